//! Metadata export in the formats a documentation build can consume.
//!
//! `text` is meant for people, the other formats for `conf.py` or a build
//! script to load.

use crate::cli::OutputFormat;
use crate::error::{Result, RevisionError};
use crate::types::DocMetadata;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render metadata in the requested format, always newline-terminated.
pub fn render(metadata: &DocMetadata, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Text => render_text(metadata),
        OutputFormat::Json => serde_json::to_string_pretty(metadata)?,
        OutputFormat::Toml => toml::to_string_pretty(metadata)?,
        OutputFormat::Env => render_env(metadata),
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

fn render_text(metadata: &DocMetadata) -> String {
    let ctx = &metadata.html_context;
    let rows: [(&str, String); 9] = [
        ("project", metadata.project.clone()),
        ("version", metadata.version.clone()),
        ("copyright", metadata.copyright.clone()),
        ("revision", metadata.full_revision_id.clone()),
        ("clean", metadata.is_clean.to_string()),
        ("source ref", metadata.source_ref.clone()),
        ("github", format!("{}/{}/{}", ctx.github_host, ctx.github_user, ctx.github_repo)),
        ("conf.py path", ctx.conf_py_path.clone()),
        ("display github", ctx.display_github.to_string()),
    ];

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter().map(|(key, value)| format!("{:<width$}  {}\n", format!("{}:", key), value, width = width + 1)).collect()
}

fn render_env(metadata: &DocMetadata) -> String {
    let vars = [
        ("DOC_VERSION", metadata.version.as_str()),
        ("DOC_COPYRIGHT", metadata.copyright.as_str()),
        ("DOC_SOURCE_REF", metadata.source_ref.as_str()),
        ("DOC_REVISION", metadata.full_revision_id.as_str()),
        ("DOC_IS_CLEAN", if metadata.is_clean { "true" } else { "false" }),
    ];
    vars.iter().map(|(name, value)| format!("export {}={}\n", name, shell_quote(value))).collect()
}

/// Single-quote a value for POSIX shells
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Write a rendered document to `output_path`, replacing any existing file.
pub fn write_file(rendered: &str, output_path: &Path) -> Result<()> {
    let io_err = |source: std::io::Error| RevisionError::Io { source, path: output_path.to_path_buf() };
    let mut file = File::create(output_path).map_err(io_err)?;
    file.write_all(rendered.as_bytes()).map_err(io_err)?;
    Ok(())
}

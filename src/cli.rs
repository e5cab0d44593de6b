use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the derived metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned "key: value" lines
    Text,
    /// Pretty-printed JSON object
    Json,
    /// TOML document
    Toml,
    /// POSIX shell `export` lines, for `eval` in build scripts
    Env,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "doc-revision")]
#[command(about = "Derive documentation version and source-link metadata from a git checkout")]
#[command(version)]
pub struct CliArgs {
    /// Path inside the git checkout to inspect
    #[arg(long, short = 'C', value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// Project file (default: $DOC_REVISION_CONFIG, else doc-revision.toml at the repository root if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail instead of producing "-dirty" metadata when the tree has uncommitted changes
    #[arg(long)]
    pub require_clean: bool,

    /// Project name
    #[arg(long)]
    pub project: Option<String>,

    /// Author named in the copyright line
    #[arg(long)]
    pub author: Option<String>,

    /// Year named in the copyright line
    #[arg(long, value_name = "YEAR")]
    pub year: Option<u16>,

    /// Branch that source links use when the tree is dirty (default: main)
    #[arg(long, value_name = "BRANCH")]
    pub default_branch: Option<String>,

    /// Source host for "Edit on GitHub" links (default: github.com)
    #[arg(long, value_name = "HOST")]
    pub github_host: Option<String>,

    /// Account or organization owning the repository
    #[arg(long, value_name = "USER")]
    pub github_user: Option<String>,

    /// Repository name (default: the project name)
    #[arg(long, value_name = "REPO")]
    pub github_repo: Option<String>,

    /// Path of the docs configuration inside the repository (default: /docs/)
    #[arg(long, value_name = "PATH")]
    pub conf_py_path: Option<String>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if !self.repo.exists() {
            return Err(format!("Repository path {} does not exist", self.repo.display()));
        }

        if let Some(ref branch) = self.default_branch
            && branch.trim().is_empty()
        {
            return Err("--default-branch must not be empty".to_string());
        }

        if let Some(ref output) = self.output
            && output.is_dir()
        {
            return Err(format!("--output {} is a directory", output.display()));
        }

        Ok(())
    }
}

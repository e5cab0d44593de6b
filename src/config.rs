/// Configuration resolution module
///
/// This module handles:
/// - Loading the optional `doc-revision.toml` project file from the repository root
/// - Applying CLI overrides on top of file values
/// - Validating the resolved settings
///
/// The result is an immutable `Settings` built once and passed into the
/// metadata pipeline.
use crate::cli::CliArgs;
use crate::error::{Result, RevisionError};
use crate::git::SourceControl;
use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "doc-revision.toml";
pub const CONFIG_ENV_VAR: &str = "DOC_REVISION_CONFIG";

pub const DEFAULT_PROJECT: &str = "golembic";
pub const DEFAULT_AUTHOR: &str = "Danny Hermes";
pub const DEFAULT_COPYRIGHT_YEAR: u16 = 2020;
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_GITHUB_HOST: &str = "github.com";
pub const DEFAULT_GITHUB_USER: &str = "dhermes";
pub const DEFAULT_CONF_PY_PATH: &str = "/docs/";

/// Contents of `doc-revision.toml`; every key is optional
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    pub project: Option<String>,
    pub author: Option<String>,
    pub copyright_year: Option<u16>,
    pub default_branch: Option<String>,
    #[serde(default)]
    pub html_context: HtmlContextFile,
}

/// `[html_context]` table of the project file
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlContextFile {
    pub display_github: Option<bool>,
    pub github_host: Option<String>,
    pub github_user: Option<String>,
    pub github_repo: Option<String>,
    pub conf_py_path: Option<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repo: PathBuf,
    pub project: String,
    pub author: String,
    pub copyright_year: u16,
    pub default_branch: String,
    pub display_github: bool,
    pub github_host: String,
    pub github_user: String,
    pub github_repo: String,
    pub conf_py_path: String,
}

impl Settings {
    /// Settings with built-in defaults for a checkout at `repo`
    pub fn defaults(repo: impl Into<PathBuf>) -> Self {
        Settings {
            repo: repo.into(),
            project: DEFAULT_PROJECT.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            copyright_year: DEFAULT_COPYRIGHT_YEAR,
            default_branch: DEFAULT_BRANCH.to_string(),
            display_github: true,
            github_host: DEFAULT_GITHUB_HOST.to_string(),
            github_user: DEFAULT_GITHUB_USER.to_string(),
            github_repo: DEFAULT_PROJECT.to_string(),
            conf_py_path: DEFAULT_CONF_PY_PATH.to_string(),
        }
    }

    /// Overlay values present in the project file
    pub fn apply_file(&mut self, file: ProjectFile) {
        if let Some(project) = file.project {
            // The repository name follows the project unless set explicitly
            if file.html_context.github_repo.is_none() {
                self.github_repo = project.clone();
            }
            self.project = project;
        }
        if let Some(author) = file.author {
            self.author = author;
        }
        if let Some(year) = file.copyright_year {
            self.copyright_year = year;
        }
        if let Some(branch) = file.default_branch {
            self.default_branch = branch;
        }

        let ctx = file.html_context;
        if let Some(display) = ctx.display_github {
            self.display_github = display;
        }
        if let Some(host) = ctx.github_host {
            self.github_host = host;
        }
        if let Some(user) = ctx.github_user {
            self.github_user = user;
        }
        if let Some(repo) = ctx.github_repo {
            self.github_repo = repo;
        }
        if let Some(path) = ctx.conf_py_path {
            self.conf_py_path = path;
        }
    }

    /// Overlay values given on the command line
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(ref project) = args.project {
            if args.github_repo.is_none() {
                self.github_repo = project.clone();
            }
            self.project = project.clone();
        }
        if let Some(ref author) = args.author {
            self.author = author.clone();
        }
        if let Some(year) = args.year {
            self.copyright_year = year;
        }
        if let Some(ref branch) = args.default_branch {
            self.default_branch = branch.clone();
        }
        if let Some(ref host) = args.github_host {
            self.github_host = host.clone();
        }
        if let Some(ref user) = args.github_user {
            self.github_user = user.clone();
        }
        if let Some(ref repo) = args.github_repo {
            self.github_repo = repo.clone();
        }
        if let Some(ref path) = args.conf_py_path {
            self.conf_py_path = path.clone();
        }
    }

    fn validate(&self, source: &Path) -> Result<()> {
        if self.default_branch.trim().is_empty() {
            return Err(config_error(source, "default_branch must not be empty"));
        }
        if self.author.trim().is_empty() {
            return Err(config_error(source, "author must not be empty"));
        }
        Ok(())
    }
}

/// Build `Settings` from defaults, the project file (if any) and CLI overrides
///
/// `env_config` is the value of `$DOC_REVISION_CONFIG`, read by the caller
/// with `config_path_from_env`.
pub fn build_settings(args: &CliArgs, scm: &dyn SourceControl, env_config: Option<PathBuf>) -> Result<Settings> {
    let mut settings = Settings::defaults(&args.repo);

    let config_path = resolve_config_path(args, scm, env_config)?;
    match &config_path {
        Some(path) => {
            debug!("Loading project file {}", path.display());
            settings.apply_file(load_project_file(path)?);
        }
        None => debug!("No project file found, using built-in defaults"),
    }

    settings.apply_args(args);

    let source = config_path.unwrap_or_else(|| PathBuf::from("<command line>"));
    settings.validate(&source)?;

    debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}

/// `$DOC_REVISION_CONFIG`, ignoring an empty value
pub fn config_path_from_env() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Explicit `--config`, then `$DOC_REVISION_CONFIG`, then `doc-revision.toml`
/// at the repository root if present
fn resolve_config_path(
    args: &CliArgs,
    scm: &dyn SourceControl,
    env_config: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    if let Some(ref path) = args.config {
        return Ok(Some(path.clone()));
    }
    if let Some(path) = env_config {
        debug!("Using project file from ${}", CONFIG_ENV_VAR);
        return Ok(Some(path));
    }
    let default = scm.repository_root()?.join(CONFIG_FILE_NAME);
    Ok(if default.is_file() { Some(default) } else { None })
}

/// Read and parse a project file; a named file that does not exist is an error
pub fn load_project_file(path: &Path) -> Result<ProjectFile> {
    let contents =
        fs::read_to_string(path).map_err(|source| RevisionError::Io { source, path: path.to_path_buf() })?;
    parse_project_file(&contents, path)
}

pub fn parse_project_file(contents: &str, path: &Path) -> Result<ProjectFile> {
    toml::from_str(contents).map_err(|e| config_error(path, &e.to_string()))
}

fn config_error(path: &Path, reason: &str) -> RevisionError {
    RevisionError::Config { path: path.to_path_buf(), reason: reason.trim().to_string() }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Error types for revision metadata derivation
///
/// Every failure is fatal to the documentation build: nothing here is retried
/// and no default metadata is ever substituted.
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevisionError {
    #[error("`{tool}` could not be executed: {source}")]
    ToolUnavailable {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    InvocationFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("unexpected output from `{command}`: {reason}")]
    MalformedOutput { command: String, reason: String },

    #[error("revision id {revision:?} cannot be shortened: {reason}")]
    InvalidRevision { revision: String, reason: String },

    #[error("working tree has uncommitted changes (refusing to emit -dirty metadata)")]
    DirtyWorkingTree,

    #[error("invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("failed to serialize metadata: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, RevisionError>;

impl From<serde_json::Error> for RevisionError {
    fn from(e: serde_json::Error) -> Self {
        RevisionError::Serialize(e.to_string())
    }
}

impl From<toml::ser::Error> for RevisionError {
    fn from(e: toml::ser::Error) -> Self {
        RevisionError::Serialize(e.to_string())
    }
}

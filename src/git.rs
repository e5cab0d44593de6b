/// Git repository utilities
///
/// This module handles:
/// - Checking for uncommitted changes in the working tree
/// - Reading the full hash of the most recent commit
/// - Locating the top of the working tree
///
/// All queries go through the `SourceControl` trait so the metadata pipeline
/// can be driven by a fake in tests.
use crate::error::{Result, RevisionError};
use crate::version::SHORT_ID_LEN;
use log::{debug, trace};
use std::path::{Path, PathBuf};
use std::process::Command;

const GIT: &str = "git";

/// The repository queries the metadata pipeline and config lookup need.
pub trait SourceControl {
    /// True iff the working tree has no modified or untracked paths.
    fn is_working_tree_clean(&self) -> Result<bool>;

    /// Full hash of the most recent commit, trimmed.
    fn current_revision_id(&self) -> Result<String>;

    /// Top-level directory of the working tree.
    fn repository_root(&self) -> Result<PathBuf>;
}

/// `SourceControl` backed by the `git` executable on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Run `git -C <repo> <args>` and return its stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", GIT, args.join(" "));
        trace!("Running `{}` in {}", command, self.repo.display());

        let output = Command::new(GIT)
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .map_err(|source| RevisionError::ToolUnavailable { tool: GIT, source })?;

        if !output.status.success() {
            return Err(RevisionError::InvocationFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| RevisionError::MalformedOutput {
            command,
            reason: format!("output is not valid UTF-8: {}", e),
        })
    }
}

impl SourceControl for GitCli {
    fn is_working_tree_clean(&self) -> Result<bool> {
        let status = self.run(&["status", "--short"])?;
        let clean = is_clean_status(&status);
        debug!("Working tree at {} is {}", self.repo.display(), if clean { "clean" } else { "dirty" });
        Ok(clean)
    }

    fn current_revision_id(&self) -> Result<String> {
        let args = ["log", "-1", "--pretty=%H"];
        let revision = self.run(&args)?.trim().to_string();
        if let Err(reason) = check_revision_id(&revision) {
            return Err(RevisionError::MalformedOutput { command: format!("{} {}", GIT, args.join(" ")), reason });
        }
        debug!("HEAD of {} is {}", self.repo.display(), revision);
        Ok(revision)
    }

    fn repository_root(&self) -> Result<PathBuf> {
        let args = ["rev-parse", "--show-toplevel"];
        let root = self.run(&args)?.trim().to_string();
        if root.is_empty() {
            return Err(RevisionError::MalformedOutput {
                command: format!("{} {}", GIT, args.join(" ")),
                reason: "no working tree path printed (bare repository?)".to_string(),
            });
        }
        trace!("Working tree root of {} is {}", self.repo.display(), root);
        Ok(PathBuf::from(root))
    }
}

/// A printed commit hash must be long enough to shorten
pub fn check_revision_id(revision: &str) -> std::result::Result<(), String> {
    if revision.is_empty() {
        return Err("no commit hash printed (repository has no commits?)".to_string());
    }
    let len = revision.chars().count();
    if len < SHORT_ID_LEN {
        return Err(format!("commit hash {:?} has {} characters, expected at least {}", revision, len, SHORT_ID_LEN));
    }
    Ok(())
}

/// Interpret `git status --short` output: clean iff nothing but whitespace
pub fn is_clean_status(status_output: &str) -> bool {
    status_output.trim().is_empty()
}

#[cfg(test)]
#[path = "git_test.rs"]
mod git_test;

/// Core data structures for revision metadata
///
/// This module defines the value types computed once per invocation:
/// the observed repository state, the derived version, and the metadata
/// handed to the documentation generator.

/// Snapshot of the checkout as observed by two separate git queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub is_clean: bool,
    pub full_revision_id: String, // "abcdef1234567890..."
}

/// Short revision id and the version string shown in the docs
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VersionInfo {
    pub short_id: String,        // "abcdef12"
    pub display_version: String, // "abcdef12" or "abcdef12-dirty"
}

/// Link context consumed by the documentation theme's "Edit on GitHub" links
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HtmlContext {
    pub display_github: bool,
    pub github_host: String,
    pub github_user: String,
    pub github_repo: String,
    /// Branch name when dirty, full commit hash when clean
    pub github_version: String,
    pub conf_py_path: String,
}

/// Everything the documentation build reads from this tool
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DocMetadata {
    pub project: String,
    pub author: String,
    pub version: String,
    pub copyright: String,
    pub source_ref: String,
    pub full_revision_id: String,
    pub is_clean: bool,

    // Tables must follow plain values for TOML output
    pub html_context: HtmlContext,
}

impl DocMetadata {
    /// Whether links point at the moving default branch instead of the exact commit
    pub fn links_to_branch(&self) -> bool {
        self.source_ref != self.full_revision_id
    }
}

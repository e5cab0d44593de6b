/// Repository state reporting
///
/// This module handles:
/// - Querying the checkout through a `SourceControl`
/// - Deriving `DocMetadata` from the observed state and the settings
///
/// A single synchronous pass: any failure aborts with no partial result.
use crate::config::Settings;
use crate::error::Result;
use crate::git::SourceControl;
use crate::types::{DocMetadata, HtmlContext, RepositoryState};
use crate::version;
use log::{debug, info};

/// Observe the repository: clean check first, then the revision read
pub fn collect_state(scm: &dyn SourceControl) -> Result<RepositoryState> {
    let is_clean = scm.is_working_tree_clean()?;
    let full_revision_id = scm.current_revision_id()?;
    Ok(RepositoryState { is_clean, full_revision_id })
}

/// Derive the documentation metadata from an observed state
pub fn derive(state: &RepositoryState, settings: &Settings) -> Result<DocMetadata> {
    let info = version::version_info(&state.full_revision_id, state.is_clean)?;
    let source_ref = version::compute_source_ref(&state.full_revision_id, state.is_clean, &settings.default_branch);
    let copyright = version::compute_copyright(settings.copyright_year, &settings.author, &info.display_version);

    debug!("Short id {} -> version {}, source ref {}", info.short_id, info.display_version, source_ref);

    Ok(DocMetadata {
        project: settings.project.clone(),
        author: settings.author.clone(),
        version: info.display_version,
        copyright,
        source_ref: source_ref.clone(),
        full_revision_id: state.full_revision_id.clone(),
        is_clean: state.is_clean,
        html_context: HtmlContext {
            display_github: settings.display_github,
            github_host: settings.github_host.clone(),
            github_user: settings.github_user.clone(),
            github_repo: settings.github_repo.clone(),
            github_version: source_ref,
            conf_py_path: settings.conf_py_path.clone(),
        },
    })
}

/// Query the repository and derive its metadata
pub fn report(scm: &dyn SourceControl, settings: &Settings) -> Result<DocMetadata> {
    let state = collect_state(scm)?;
    let metadata = derive(&state, settings)?;
    info!("Documentation version {} (source ref {})", metadata.version, metadata.source_ref);
    Ok(metadata)
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod metadata_test;

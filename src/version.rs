/// Version string derivation
///
/// This module handles:
/// - Shortening a full commit hash into a version id
/// - Appending the "-dirty" suffix for modified working trees
/// - Choosing the source reference for hosted source links
/// - Formatting the copyright line
///
/// Everything here is pure; the git queries live in `git`.
use crate::error::{Result, RevisionError};
use crate::types::VersionInfo;

/// Number of leading hash characters used as the short id
pub const SHORT_ID_LEN: usize = 8;

pub const DIRTY_SUFFIX: &str = "-dirty";

/// Take the first `SHORT_ID_LEN` characters of a full revision id
///
/// Ids that are too short are rejected instead of silently truncated.
pub fn short_id(full_revision_id: &str) -> Result<&str> {
    match full_revision_id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => Ok(&full_revision_id[..end]),
        None if full_revision_id.chars().count() == SHORT_ID_LEN => Ok(full_revision_id),
        None => Err(RevisionError::InvalidRevision {
            revision: full_revision_id.to_string(),
            reason: format!("shorter than {} characters", SHORT_ID_LEN),
        }),
    }
}

/// Short id, with "-dirty" appended when the tree has uncommitted changes
pub fn compute_version(full_revision_id: &str, is_clean: bool) -> Result<String> {
    let short = short_id(full_revision_id)?;
    if is_clean { Ok(short.to_string()) } else { Ok(format!("{}{}", short, DIRTY_SUFFIX)) }
}

/// Both the short id and the display version
pub fn version_info(full_revision_id: &str, is_clean: bool) -> Result<VersionInfo> {
    Ok(VersionInfo {
        short_id: short_id(full_revision_id)?.to_string(),
        display_version: compute_version(full_revision_id, is_clean)?,
    })
}

/// Reference used to build source links
///
/// A dirty tree has no commit matching what was documented, so links fall
/// back to the default branch head.
pub fn compute_source_ref(full_revision_id: &str, is_clean: bool, default_branch: &str) -> String {
    if is_clean { full_revision_id.to_string() } else { default_branch.to_string() }
}

/// "<year>, <author> Revision <version>"
pub fn compute_copyright(year: u16, author: &str, version: &str) -> String {
    format!("{}, {} Revision {}", year, author, version)
}

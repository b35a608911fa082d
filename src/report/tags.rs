//! Tag enumeration for summary reports.

use crate::backend::Backend;
use crate::error::Result;
use crate::models::{RevisionRef, Tag};

/// Pseudo-tags the backend reports but that never name a user tag.
pub const SPECIAL_TAGS: &[&[u8]] = &[b"tip"];

/// Visits tags newest-defined first.
///
/// Tags whose node is no longer in the changelog (rewritten history) are
/// skipped; any other backend failure aborts the enumeration.
pub fn each_tag<F>(backend: &dyn Backend, mut visit: F) -> Result<()>
where
    F: FnMut(Tag) -> Result<()>,
{
    for (name, node) in backend.tag_list()?.into_iter().rev() {
        if SPECIAL_TAGS.contains(&name.as_slice()) {
            continue;
        }
        let number = match backend.node_revision(&node) {
            Ok(number) => number,
            Err(e) if e.is_not_found() => continue,
            Err(e) => return Err(e),
        };
        visit(Tag {
            name,
            revision: RevisionRef::new(number, node),
        })?;
    }
    Ok(())
}

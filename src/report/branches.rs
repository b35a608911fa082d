//! Branch enumeration for summary reports.
//!
//! Branches are ordered by tip revision, newest first, ties keeping backend
//! order. A branch is only reported while its recorded tip is still one of
//! its open heads; closed or superseded tips are dropped.

use crate::backend::Backend;
use crate::error::Result;
use crate::models::{Branch, NodeHash, RevisionRef};

/// Every branch with its tip resolved and its liveness checked, in report order.
pub fn branch_candidates(backend: &dyn Backend) -> Result<Vec<Branch>> {
    let mut tips = Vec::new();
    for row in backend.branch_map()? {
        let number = backend.node_revision(&row.tip)?;
        tips.push((row.name, row.tip, number));
    }
    // Stable sort: equal revisions keep branch-map order.
    tips.sort_by(|a, b| b.2.cmp(&a.2));

    let mut branches = Vec::with_capacity(tips.len());
    for (name, tip, number) in tips {
        let node = lookup_tip(backend, number, &tip)?;
        let heads = backend.branch_heads(&name)?;
        branches.push(Branch {
            name,
            is_current_head: heads.contains(&node),
            revision: RevisionRef::new(number, tip),
        });
    }
    Ok(branches)
}

/// Visits live branches in report order.
pub fn each_branch<F>(backend: &dyn Backend, mut visit: F) -> Result<()>
where
    F: FnMut(Branch) -> Result<()>,
{
    for branch in branch_candidates(backend)? {
        if branch.is_current_head {
            visit(branch)?;
        }
    }
    Ok(())
}

/// Re-resolves a tip through its revision number, falling back to the known
/// node when the backend cannot look numbers up.
fn lookup_tip(backend: &dyn Backend, number: u64, known: &NodeHash) -> Result<NodeHash> {
    match backend.resolve_revision(number.to_string().as_bytes()) {
        Ok(r) => Ok(r.hash),
        Err(e) if e.is_not_found() => Ok(known.clone()),
        Err(e) => Err(e),
    }
}

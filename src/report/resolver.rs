//! Revision spec → `RevisionRef`.

use crate::backend::Backend;
use crate::error::{AppError, Result};
use crate::models::RevisionRef;

/// Resolves a decoded revision spec. An empty spec is the tip.
///
/// An empty changelog has no tip, so even the empty spec fails with `NotFound`.
pub fn resolve_revision(backend: &dyn Backend, spec: &[u8]) -> Result<RevisionRef> {
    if spec.is_empty() {
        return resolve_tip(backend);
    }
    backend.resolve_revision(spec)
}

pub fn resolve_tip(backend: &dyn Backend) -> Result<RevisionRef> {
    if backend.changelog_len() == 0 {
        return Err(AppError::NotFound("tip (empty repository)".to_string()));
    }
    backend.resolve_revision(b"")
}

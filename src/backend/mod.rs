//! Read-only view of a version-control repository.
//!
//! Reports only ever consume repository state through [`Backend`], so the
//! enumerators and the manifest lister can run against the git-backed
//! `GitRepository` or the in-memory [`MemoryBackend`] used by tests.

pub mod memory;

pub use memory::MemoryBackend;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{BranchTip, FileMetadata, NodeHash, RevisionRef};

/// Full manifest of one revision: path bytes → file node, in ascending path order.
pub type Manifest = BTreeMap<Vec<u8>, NodeHash>;

pub trait Backend {
    /// Repository root path as raw bytes.
    fn root(&self) -> Vec<u8>;

    /// Number of changesets in the changelog.
    fn changelog_len(&self) -> u64;

    /// Resolves a revision spec (number, node or symbolic name).
    ///
    /// An empty spec means the tip. Fails with `NotFound` when nothing matches.
    fn resolve_revision(&self, spec: &[u8]) -> Result<RevisionRef>;

    /// Changelog index of a changeset node, `NotFound` when it is not in the changelog.
    fn node_revision(&self, node: &NodeHash) -> Result<u64>;

    /// Tags in backend order. May include the reserved `tip` pseudo-tag.
    fn tag_list(&self) -> Result<Vec<(Vec<u8>, NodeHash)>>;

    /// Every named branch with its recorded tip.
    fn branch_map(&self) -> Result<Vec<BranchTip>>;

    /// Open (non-closed) heads of a branch.
    fn branch_heads(&self, name: &[u8]) -> Result<Vec<NodeHash>>;

    fn read_manifest(&self, revision: &RevisionRef) -> Result<Manifest>;

    /// Details of the file node `node` stored at `path`, as seen from `revision`.
    fn file_metadata(
        &self,
        path: &[u8],
        node: &NodeHash,
        revision: &RevisionRef,
    ) -> Result<FileMetadata>;
}

//! Named references emitted in a summary report.
//!
//! - `Tag`: human-assigned name bound to a changeset
//! - `Branch`: named line of development with its tip
//! - `BranchTip`: raw branch-map row as the backend reports it; whether the
//!   tip is still open is answered by the backend's branch heads

use super::revision::{NodeHash, RevisionRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: Vec<u8>,
    pub revision: RevisionRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: Vec<u8>,
    pub revision: RevisionRef,
    /// Whether the recorded tip is still one of the branch's open heads.
    pub is_current_head: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTip {
    pub name: Vec<u8>,
    pub tip: NodeHash,
}

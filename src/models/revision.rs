//! Changeset identifiers.
//!
//! - `NodeHash`: lowercase hex digest of a changeset or file revision
//! - `RevisionRef`: changelog index paired with its node

use std::fmt;

/// Hex digest identifying a changeset or a file revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHash(String);

impl NodeHash {
    /// Accepts any non-empty ASCII hex string and normalizes it to lowercase.
    pub fn parse(hex: &str) -> Option<Self> {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(hex.to_ascii_lowercase()))
    }

    /// Hex-encodes a raw digest.
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<git2::Oid> for NodeHash {
    fn from(oid: git2::Oid) -> Self {
        Self(oid.to_string())
    }
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A changeset addressed both by its changelog index and by its node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRef {
    pub number: u64,
    pub hash: NodeHash,
}

impl RevisionRef {
    pub fn new(number: u64, hash: NodeHash) -> Self {
        Self { number, hash }
    }
}

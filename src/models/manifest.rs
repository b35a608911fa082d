//! Manifest listing DTOs.
//!
//! - `ManifestEntry`: one child of the queried directory (file or subdirectory)
//! - `FileMetadata`: per-file details the backend reports for a manifest node

use super::revision::RevisionRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    File {
        name: String,
        /// Changeset number at which the content last changed, paired with the file node.
        revision: RevisionRef,
        mtime: i64,
        size: u64,
    },
    Directory {
        name: String,
    },
}

impl ManifestEntry {
    pub fn name(&self) -> &str {
        match self {
            ManifestEntry::File { name, .. } | ManifestEntry::Directory { name } => name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, ManifestEntry::Directory { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub revision: u64,
    pub mtime: i64,
    pub size: u64,
}

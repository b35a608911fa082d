//! Data types flowing from the backend into reports.
//!
//! - `revision`: NodeHash, RevisionRef
//! - `refs`: Tag, Branch, BranchTip
//! - `manifest`: ManifestEntry, FileMetadata

pub mod manifest;
pub mod refs;
pub mod revision;

pub use manifest::*;
pub use refs::*;
pub use revision::*;

//! git2-backed implementation of `Backend`.
//!
//! - `changelog`: dense revision numbers for commits
//! - `refs`: tags and local branches
//! - `tree`: manifest reads
//! - `history`: per-file introducing revision

pub mod changelog;
pub mod history;
pub mod refs;
pub mod repository;
pub mod tree;

pub use repository::GitRepository;

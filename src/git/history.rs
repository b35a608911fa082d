use git2::{Commit, Oid, Repository};

use crate::error::{AppError, Result};
use crate::git::changelog::Changelog;
use crate::git::tree::{blob_at, revision_tree};
use crate::models::{FileMetadata, NodeHash, RevisionRef};

/// Metadata for the blob `node` at `path` as seen from `revision`: the newest
/// first-parent ancestor (or `revision` itself) whose parent holds a different
/// blob at `path`, or none, plus that changeset's commit time and the blob size.
pub fn file_metadata(
    repo: &Repository,
    changelog: &Changelog,
    path: &[u8],
    node: &NodeHash,
    revision: &RevisionRef,
) -> Result<FileMetadata> {
    let not_found = || AppError::NotFound(format!("{}@{}", String::from_utf8_lossy(path), node));
    let blob_oid = Oid::from_str(node.as_str()).map_err(|_| not_found())?;
    if blob_at(repo, &revision_tree(repo, changelog, revision)?, path)? != Some(blob_oid) {
        return Err(not_found());
    }
    let size = repo.find_blob(blob_oid)?.size() as u64;

    let mut revwalk = repo.revwalk()?;
    revwalk.push(Oid::from_str(revision.hash.as_str())?)?;
    revwalk.simplify_first_parent()?;

    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        if changes_blob(repo, &commit, path, blob_oid)? {
            let number = changelog.rev(commit.id()).ok_or_else(not_found)?;
            return Ok(FileMetadata {
                revision: number,
                mtime: commit.time().seconds(),
                size,
            });
        }
    }
    Err(not_found())
}

/// Whether `commit` is where `blob` landed at `path`: its first parent holds
/// something else there, or it has no parent.
fn changes_blob(repo: &Repository, commit: &Commit, path: &[u8], blob: Oid) -> Result<bool> {
    if commit.parent_count() == 0 {
        return Ok(true);
    }
    let parent_tree = commit.parent(0)?.tree()?;
    Ok(blob_at(repo, &parent_tree, path)? != Some(blob))
}

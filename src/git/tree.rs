use git2::{ObjectType, Oid, Repository, Tree};

use crate::backend::Manifest;
use crate::error::{AppError, Result};
use crate::git::changelog::Changelog;
use crate::models::{NodeHash, RevisionRef};

/// Full manifest of a revision: every blob path (raw bytes, `/`-joined) and its oid.
/// Submodule links are not files of this repository and are left out.
pub fn read_manifest(
    repo: &Repository,
    changelog: &Changelog,
    revision: &RevisionRef,
) -> Result<Manifest> {
    let tree = revision_tree(repo, changelog, revision)?;
    let mut manifest = Manifest::new();
    collect_blobs(repo, &tree, b"", &mut manifest)?;
    Ok(manifest)
}

pub fn revision_tree<'r>(
    repo: &'r Repository,
    changelog: &Changelog,
    revision: &RevisionRef,
) -> Result<Tree<'r>> {
    let oid = changelog
        .oid(revision.number)
        .filter(|oid| NodeHash::from(*oid) == revision.hash)
        .ok_or_else(|| AppError::NotFound(revision.hash.to_string()))?;
    Ok(repo.find_commit(oid)?.tree()?)
}

fn collect_blobs(repo: &Repository, tree: &Tree, base: &[u8], out: &mut Manifest) -> Result<()> {
    for entry in tree.iter() {
        let mut path = base.to_vec();
        if !path.is_empty() {
            path.push(b'/');
        }
        path.extend_from_slice(entry.name_bytes());

        match entry.kind() {
            Some(ObjectType::Blob) => {
                out.insert(path, NodeHash::from(entry.id()));
            }
            Some(ObjectType::Tree) => {
                let subtree = repo.find_tree(entry.id())?;
                collect_blobs(repo, &subtree, &path, out)?;
            }
            _ => continue,
        }
    }
    Ok(())
}

/// Oid of the blob stored at `path` in `tree`, if any.
pub fn blob_at<'r>(repo: &'r Repository, tree: &Tree<'r>, path: &[u8]) -> Result<Option<Oid>> {
    let mut components = path.split(|b| *b == b'/').peekable();
    let mut current = tree.clone();
    while let Some(name) = components.next() {
        let found = current
            .iter()
            .find(|e| e.name_bytes() == name)
            .map(|e| (e.kind(), e.id()));
        let Some((kind, id)) = found else {
            return Ok(None);
        };
        let is_last = components.peek().is_none();
        match (kind, is_last) {
            (Some(ObjectType::Blob), true) => return Ok(Some(id)),
            (Some(ObjectType::Tree), false) => current = repo.find_tree(id)?,
            _ => return Ok(None),
        }
    }
    Ok(None)
}

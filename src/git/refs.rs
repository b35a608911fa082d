use git2::{BranchType, ObjectType, Repository};

use crate::error::Result;
use crate::git::changelog::Changelog;
use crate::models::{BranchTip, NodeHash};

const TAG_PREFIX: &[u8] = b"refs/tags/";

/// Tags ordered by revision, then name; tags outside the changelog come first.
/// The `tip` pseudo-tag closes the list when the changelog is not empty.
pub fn tag_list(repo: &Repository, changelog: &Changelog) -> Result<Vec<(Vec<u8>, NodeHash)>> {
    let mut tags = Vec::new();
    for reference in repo.references()? {
        let reference = reference?;
        let Some(name) = reference.name_bytes().strip_prefix(TAG_PREFIX) else {
            continue;
        };
        let target = reference.peel(ObjectType::Any)?;
        tags.push((changelog.rev(target.id()), name.to_vec(), target.id()));
    }
    tags.sort();

    let mut list: Vec<(Vec<u8>, NodeHash)> = tags
        .into_iter()
        .map(|(_, name, oid)| (name, NodeHash::from(oid)))
        .collect();
    if let Some(tip) = changelog.tip() {
        list.push((b"tip".to_vec(), tip.hash));
    }
    Ok(list)
}

/// Local branches sorted by name.
pub fn branch_map(repo: &Repository) -> Result<Vec<BranchTip>> {
    let mut branches = Vec::new();
    for branch in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = branch?;
        let name = branch.name_bytes()?.to_vec();
        let tip = branch.get().peel_to_commit()?.id();
        branches.push(BranchTip {
            name,
            tip: NodeHash::from(tip),
        });
    }
    branches.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(branches)
}

/// A git branch has exactly one head, its tip, and is never closed.
/// Unknown names have none.
pub fn branch_heads(repo: &Repository, name: &[u8]) -> Result<Vec<NodeHash>> {
    let Ok(name) = std::str::from_utf8(name) else {
        return Ok(Vec::new());
    };
    let branch = match repo.find_branch(name, BranchType::Local) {
        Ok(branch) => branch,
        Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let tip = branch.get().peel_to_commit()?.id();
    Ok(vec![NodeHash::from(tip)])
}

//! Dense revision numbering for a git repository.
//!
//! Git has no changelog index, so one is derived when the repository is
//! opened: every commit reachable from HEAD, local branches and tags, in
//! topological order with the oldest commit at index 0.

use git2::{Oid, Repository, Sort};
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{NodeHash, RevisionRef};

pub struct Changelog {
    nodes: Vec<Oid>,
    index: HashMap<Oid, u64>,
}

impl Changelog {
    pub fn build(repo: &Repository) -> Result<Self> {
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;

        let mut pushed = 0usize;
        if let Ok(head) = repo.head() {
            if let Ok(commit) = head.peel_to_commit() {
                revwalk.push(commit.id())?;
                pushed += 1;
            }
        }
        for reference in repo.references()? {
            let reference = reference?;
            if !(reference.is_branch() || reference.is_tag()) {
                continue;
            }
            // Tags may point at trees or blobs; those add nothing to the changelog.
            if let Ok(commit) = reference.peel_to_commit() {
                revwalk.push(commit.id())?;
                pushed += 1;
            }
        }

        let mut nodes = Vec::new();
        if pushed > 0 {
            for oid in revwalk {
                nodes.push(oid?);
            }
        }
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, oid)| (*oid, i as u64))
            .collect();

        Ok(Self { nodes, index })
    }

    pub fn len(&self) -> u64 {
        self.nodes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn oid(&self, number: u64) -> Option<Oid> {
        self.nodes.get(number as usize).copied()
    }

    pub fn at(&self, number: u64) -> Option<RevisionRef> {
        self.oid(number)
            .map(|oid| RevisionRef::new(number, NodeHash::from(oid)))
    }

    pub fn rev(&self, oid: Oid) -> Option<u64> {
        self.index.get(&oid).copied()
    }

    pub fn tip(&self) -> Option<RevisionRef> {
        self.len().checked_sub(1).and_then(|n| self.at(n))
    }

    /// Resolves a revision spec: empty or `tip`, a revision number, then
    /// anything `git rev-parse` understands that names a numbered commit.
    pub fn resolve(&self, repo: &Repository, spec: &[u8]) -> Result<RevisionRef> {
        let not_found = || AppError::revision_not_found(spec);
        if spec.is_empty() || spec == b"tip" {
            return self.tip().ok_or_else(not_found);
        }

        let text = std::str::from_utf8(spec).map_err(|_| not_found())?;
        if text.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(found) = text.parse::<u64>().ok().and_then(|n| self.at(n)) {
                return Ok(found);
            }
        }

        let commit = repo
            .revparse_single(text)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| not_found())?;
        self.rev(commit.id())
            .map(|number| RevisionRef::new(number, NodeHash::from(commit.id())))
            .ok_or_else(not_found)
    }
}

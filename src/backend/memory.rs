use std::collections::HashMap;

use super::{Backend, Manifest};
use crate::error::{AppError, Result};
use crate::models::{BranchTip, FileMetadata, NodeHash, RevisionRef};

struct Changeset {
    node: NodeHash,
    time: i64,
    manifest: Manifest,
}

struct Head {
    node: NodeHash,
    closed: bool,
}

/// An in-memory implementation of `Backend`, intended primarily for testing.
///
/// Changesets are appended with [`MemoryBackend::commit`]; each one carries a
/// complete manifest. File nodes are derived from file content; history is
/// linear, and a file's revision is the last changeset that changed it.
pub struct MemoryBackend {
    root: Vec<u8>,
    changesets: Vec<Changeset>,
    tags: Vec<(Vec<u8>, NodeHash)>,
    branches: Vec<BranchTip>,
    heads: HashMap<Vec<u8>, Vec<Head>>,
    sizes: HashMap<NodeHash, u64>,
    numeric_lookup: bool,
}

impl MemoryBackend {
    pub fn new(root: impl Into<Vec<u8>>) -> Self {
        Self {
            root: root.into(),
            changesets: Vec::new(),
            tags: Vec::new(),
            branches: Vec::new(),
            heads: HashMap::new(),
            sizes: HashMap::new(),
            numeric_lookup: true,
        }
    }

    /// Makes decimal revision specs unresolvable, like backends that only
    /// accept node lookups.
    pub fn without_numeric_lookup(mut self) -> Self {
        self.numeric_lookup = false;
        self
    }

    /// Appends a changeset whose manifest is exactly `files` (path, content).
    pub fn commit(&mut self, time: i64, files: &[(&str, &str)]) -> RevisionRef {
        let number = self.changesets.len() as u64;
        let node = changeset_node(number);

        let mut manifest = Manifest::new();
        for (path, content) in files {
            let file_node = file_node(content.as_bytes());
            self.sizes.insert(file_node.clone(), content.len() as u64);
            manifest.insert(path.as_bytes().to_vec(), file_node);
        }

        self.changesets.push(Changeset {
            node: node.clone(),
            time,
            manifest,
        });
        RevisionRef::new(number, node)
    }

    pub fn tag(&mut self, name: &str, node: &NodeHash) {
        self.tags.push((name.as_bytes().to_vec(), node.clone()));
    }

    /// Records a branch-map row and registers its tip as a head.
    pub fn branch(&mut self, name: &str, tip: &NodeHash, closed: bool) {
        self.branches.push(BranchTip {
            name: name.as_bytes().to_vec(),
            tip: tip.clone(),
        });
        self.head(name, tip, closed);
    }

    pub fn head(&mut self, name: &str, node: &NodeHash, closed: bool) {
        self.heads
            .entry(name.as_bytes().to_vec())
            .or_default()
            .push(Head {
                node: node.clone(),
                closed,
            });
    }

    /// Drops a node from a branch's head set, leaving the branch-map row stale.
    pub fn retire_head(&mut self, name: &str, node: &NodeHash) {
        if let Some(heads) = self.heads.get_mut(name.as_bytes()) {
            heads.retain(|h| &h.node != node);
        }
    }

    fn at(&self, number: u64) -> Option<RevisionRef> {
        self.changesets
            .get(number as usize)
            .map(|c| RevisionRef::new(number, c.node.clone()))
    }

    fn by_node_prefix(&self, prefix: &str) -> Option<RevisionRef> {
        let mut matches = self
            .changesets
            .iter()
            .enumerate()
            .filter(|(_, c)| c.node.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some((i, c)), None) => Some(RevisionRef::new(i as u64, c.node.clone())),
            _ => None,
        }
    }
}

impl Backend for MemoryBackend {
    fn root(&self) -> Vec<u8> {
        self.root.clone()
    }

    fn changelog_len(&self) -> u64 {
        self.changesets.len() as u64
    }

    fn resolve_revision(&self, spec: &[u8]) -> Result<RevisionRef> {
        let not_found = || AppError::revision_not_found(spec);
        if spec.is_empty() || spec == b"tip" {
            return self
                .changelog_len()
                .checked_sub(1)
                .and_then(|n| self.at(n))
                .ok_or_else(not_found);
        }

        let text = std::str::from_utf8(spec).map_err(|_| not_found())?;
        if let Ok(number) = text.parse::<u64>() {
            if self.numeric_lookup {
                return self.at(number).ok_or_else(not_found);
            }
            return Err(not_found());
        }
        if let Some((_, node)) = self.tags.iter().rev().find(|(name, _)| name == spec) {
            let number = self.node_revision(node)?;
            return Ok(RevisionRef::new(number, node.clone()));
        }
        if let Some(branch) = self.branches.iter().find(|b| b.name == spec) {
            let number = self.node_revision(&branch.tip)?;
            return Ok(RevisionRef::new(number, branch.tip.clone()));
        }
        NodeHash::parse(text)
            .and_then(|node| self.by_node_prefix(node.as_str()))
            .ok_or_else(not_found)
    }

    fn node_revision(&self, node: &NodeHash) -> Result<u64> {
        self.changesets
            .iter()
            .position(|c| &c.node == node)
            .map(|i| i as u64)
            .ok_or_else(|| AppError::NotFound(node.to_string()))
    }

    fn tag_list(&self) -> Result<Vec<(Vec<u8>, NodeHash)>> {
        Ok(self.tags.clone())
    }

    fn branch_map(&self) -> Result<Vec<BranchTip>> {
        Ok(self.branches.clone())
    }

    fn branch_heads(&self, name: &[u8]) -> Result<Vec<NodeHash>> {
        Ok(self
            .heads
            .get(name)
            .map(|heads| {
                heads
                    .iter()
                    .filter(|h| !h.closed)
                    .map(|h| h.node.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn read_manifest(&self, revision: &RevisionRef) -> Result<Manifest> {
        self.changesets
            .get(revision.number as usize)
            .filter(|c| c.node == revision.hash)
            .map(|c| c.manifest.clone())
            .ok_or_else(|| AppError::NotFound(revision.hash.to_string()))
    }

    fn file_metadata(
        &self,
        path: &[u8],
        node: &NodeHash,
        revision: &RevisionRef,
    ) -> Result<FileMetadata> {
        let not_found =
            || AppError::NotFound(format!("{}@{}", String::from_utf8_lossy(path), node));
        let holds = |number: usize| {
            self.changesets
                .get(number)
                .is_some_and(|c| c.manifest.get(path) == Some(node))
        };

        let mut number = revision.number as usize;
        if !holds(number) {
            return Err(not_found());
        }
        while number > 0 && holds(number - 1) {
            number -= 1;
        }
        Ok(FileMetadata {
            revision: number as u64,
            mtime: self.changesets[number].time,
            size: self.sizes.get(node).copied().ok_or_else(not_found)?,
        })
    }
}

fn changeset_node(number: u64) -> NodeHash {
    let mixed = (number as u128 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15_f39c_c060_5ced_c835);
    node_from_u128(mixed)
}

fn file_node(content: &[u8]) -> NodeHash {
    // FNV-1a
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in content {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    node_from_u128((u128::from(hash) << 32) | 0xf11e)
}

fn node_from_u128(value: u128) -> NodeHash {
    // Padded to the 20-byte width of a SHA-1 digest.
    let mut digest = [0u8; 20];
    digest[4..].copy_from_slice(&value.to_be_bytes());
    NodeHash::from_digest(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_backend_has_no_tip() {
        let backend = MemoryBackend::new("/repo");
        assert_eq!(backend.changelog_len(), 0);
        assert!(backend.resolve_revision(b"").unwrap_err().is_not_found());
    }

    #[test]
    fn resolves_numbers_tags_and_nodes() {
        let mut backend = MemoryBackend::new("/repo");
        let r0 = backend.commit(10, &[("a", "1")]);
        let r1 = backend.commit(20, &[("a", "2")]);
        backend.tag("v1", &r0.hash);

        assert_eq!(backend.resolve_revision(b"").unwrap(), r1);
        assert_eq!(backend.resolve_revision(b"tip").unwrap(), r1);
        assert_eq!(backend.resolve_revision(b"0").unwrap(), r0);
        assert_eq!(backend.resolve_revision(b"v1").unwrap(), r0);
        assert_eq!(backend.resolve_revision(r1.hash.as_bytes()).unwrap(), r1);
        assert!(backend.resolve_revision(b"7").unwrap_err().is_not_found());
    }

    #[test]
    fn unchanged_files_keep_their_introducing_revision() {
        let mut backend = MemoryBackend::new("/repo");
        backend.commit(10, &[("a", "same"), ("b", "old")]);
        let r1 = backend.commit(20, &[("a", "same"), ("b", "new")]);

        let manifest = backend.read_manifest(&r1).unwrap();
        let a = backend.file_metadata(b"a", &manifest[&b"a".to_vec()], &r1).unwrap();
        let b = backend.file_metadata(b"b", &manifest[&b"b".to_vec()], &r1).unwrap();
        assert_eq!((a.revision, a.mtime, a.size), (0, 10, 4));
        assert_eq!((b.revision, b.mtime, b.size), (1, 20, 3));
    }

    #[test]
    fn reverted_content_takes_the_reverting_revision() {
        let mut backend = MemoryBackend::new("/repo");
        let r0 = backend.commit(10, &[("a", "v1")]);
        backend.commit(20, &[("a", "v2")]);
        let r2 = backend.commit(30, &[("a", "v1")]);

        let node = backend.read_manifest(&r2).unwrap()[&b"a".to_vec()].clone();
        let meta = backend.file_metadata(b"a", &node, &r2).unwrap();
        assert_eq!((meta.revision, meta.mtime), (2, 30));
        assert_eq!(backend.file_metadata(b"a", &node, &r0).unwrap().revision, 0);
        let missing = backend.file_metadata(b"b", &node, &r2).unwrap_err();
        assert!(missing.is_not_found());
    }

    #[test]
    fn closed_heads_are_not_reported() {
        let mut backend = MemoryBackend::new("/repo");
        let r0 = backend.commit(10, &[]);
        backend.branch("old", &r0.hash, true);
        assert!(backend.branch_heads(b"old").unwrap().is_empty());
    }
}

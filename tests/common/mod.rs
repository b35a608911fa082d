//! Shared fixture: real git repositories built with git2 inside a TempDir.
//!
//! Every commit is given its complete file set, so tests state exactly what
//! each revision contains.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

pub struct TestRepo {
    pub repo: Repository,
    dir: TempDir,
}

impl TestRepo {
    /// An empty repository whose HEAD points at the unborn `main` branch.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("failed to init repo");
        Self { repo, dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commits `files` as the full content of the next revision of `main`.
    pub fn commit(&self, time: i64, files: &[(&str, &str)]) -> Oid {
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .map(|c| c.id());
        self.commit_on("HEAD", parent, time, files)
    }

    /// Commits onto an arbitrary reference with an explicit parent.
    pub fn commit_on(
        &self,
        refname: &str,
        parent: Option<Oid>,
        time: i64,
        files: &[(&str, &str)],
    ) -> Oid {
        let entries: Vec<(&str, &[u8])> = files.iter().map(|(p, c)| (*p, c.as_bytes())).collect();
        let tree_id = write_tree(&self.repo, &entries);
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::new("Test User", "test@example.com", &Time::new(time, 0)).unwrap();
        let parents: Vec<git2::Commit> = parent
            .map(|oid| vec![self.repo.find_commit(oid).unwrap()])
            .unwrap_or_default();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        self.repo
            .commit(Some(refname), &sig, &sig, "test commit", &tree, &parent_refs)
            .expect("failed to commit")
    }

    pub fn tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        let sig = Signature::new("Test User", "test@example.com", &Time::new(0, 0)).unwrap();
        self.repo.tag(name, &object, &sig, "release", false).unwrap();
    }

    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        self.repo.branch(name, &commit, false).unwrap();
    }

    pub fn blob(&self, content: &str) -> Oid {
        self.repo.blob(content.as_bytes()).unwrap()
    }
}

fn write_tree(repo: &Repository, files: &[(&str, &[u8])]) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    let mut subdirs: BTreeMap<&str, Vec<(&str, &[u8])>> = BTreeMap::new();
    for (path, content) in files {
        match path.split_once('/') {
            Some((dir, rest)) => subdirs.entry(dir).or_default().push((rest, *content)),
            None => {
                let blob = repo.blob(content).unwrap();
                builder.insert(path, blob, 0o100644).unwrap();
            }
        }
    }
    for (dir, entries) in subdirs {
        let oid = write_tree(repo, &entries);
        builder.insert(dir, oid, 0o040000).unwrap();
    }
    builder.write().unwrap()
}

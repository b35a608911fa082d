use git2::Repository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::backend::{Backend, Manifest};
use crate::error::{AppError, Result};
use crate::git::changelog::Changelog;
use crate::git::{history, refs, tree};
use crate::models::{BranchTip, FileMetadata, NodeHash, RevisionRef};

/// A git repository opened for one report: the handle plus the changelog
/// numbering derived at open time.
pub struct GitRepository {
    pub repo: Mutex<Repository>,
    pub path: String,
    workdir: PathBuf,
    changelog: Changelog,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::discover(&path).map_err(|_| AppError::RepoNotFound(path_str.clone()))?;
        let changelog = Changelog::build(&repo)?;
        let workdir = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path_str, workdir = %workdir.display(), changesets = changelog.len(), "repository opened");

        Ok(Self {
            repo: Mutex::new(repo),
            path: path_str,
            workdir,
            changelog,
        })
    }

    /// Working tree root, or the git directory of a bare repository.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&repo)
    }
}

impl Backend for GitRepository {
    fn root(&self) -> Vec<u8> {
        let mut bytes = self.workdir.as_os_str().as_encoded_bytes().to_vec();
        while bytes.len() > 1 && bytes.ends_with(b"/") {
            bytes.pop();
        }
        bytes
    }

    fn changelog_len(&self) -> u64 {
        self.changelog.len()
    }

    fn resolve_revision(&self, spec: &[u8]) -> Result<RevisionRef> {
        self.with_repo(|repo| self.changelog.resolve(repo, spec))
    }

    fn node_revision(&self, node: &NodeHash) -> Result<u64> {
        git2::Oid::from_str(node.as_str())
            .ok()
            .and_then(|oid| self.changelog.rev(oid))
            .ok_or_else(|| AppError::NotFound(node.to_string()))
    }

    fn tag_list(&self) -> Result<Vec<(Vec<u8>, NodeHash)>> {
        self.with_repo(|repo| refs::tag_list(repo, &self.changelog))
    }

    fn branch_map(&self) -> Result<Vec<BranchTip>> {
        self.with_repo(refs::branch_map)
    }

    fn branch_heads(&self, name: &[u8]) -> Result<Vec<NodeHash>> {
        self.with_repo(|repo| refs::branch_heads(repo, name))
    }

    fn read_manifest(&self, revision: &RevisionRef) -> Result<Manifest> {
        self.with_repo(|repo| tree::read_manifest(repo, &self.changelog, revision))
    }

    fn file_metadata(
        &self,
        path: &[u8],
        node: &NodeHash,
        revision: &RevisionRef,
    ) -> Result<FileMetadata> {
        self.with_repo(|repo| history::file_metadata(repo, &self.changelog, path, node, revision))
    }
}

//! One-level directory listing at a revision.
//!
//! The backend hands over the full manifest (path → file node). Only the
//! immediate children of the queried prefix are reported: bare file names as
//! files, and the first path segment of anything deeper as a directory.
//! Each child name is reported once: the first classification wins, so a
//! later directory cannot shadow an earlier file of the same name.

use std::collections::HashSet;

use encoding_rs::Encoding;

use crate::backend::Backend;
use crate::codec::decode_text;
use crate::error::Result;
use crate::models::{ManifestEntry, RevisionRef};

/// Normalizes a directory path to a manifest prefix.
///
/// Trailing separators collapse to one, leading ones are dropped, and the
/// root (empty path) becomes the empty prefix.
pub fn manifest_prefix(path: &str) -> String {
    let mut prefix = path.trim_end_matches('/').to_string();
    prefix.push('/');
    prefix.trim_start_matches('/').to_string()
}

/// Splits the part of a manifest path below the prefix into its child name
/// and whether that child is a directory.
fn child_name(rest: &str) -> (&str, bool) {
    match rest.find('/') {
        Some(i) => (&rest[..i], true),
        None => (rest, false),
    }
}

/// Visits the immediate children of `path` at `revision`, in ascending order
/// of full manifest path.
pub fn each_entry<F>(
    backend: &dyn Backend,
    revision: &RevisionRef,
    path: &str,
    encoding: &'static Encoding,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(ManifestEntry) -> Result<()>,
{
    let prefix = manifest_prefix(path);
    let manifest = backend.read_manifest(revision)?;

    let mut known: HashSet<String> = HashSet::new();
    for (file, node) in &manifest {
        let file_path = decode_text(file, encoding)?;
        let Some(rest) = file_path.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let (name, is_dir) = child_name(rest);
        if !known.insert(name.to_string()) {
            continue;
        }

        let entry = if is_dir {
            ManifestEntry::Directory {
                name: name.to_string(),
            }
        } else {
            let meta = backend.file_metadata(file, node, revision)?;
            ManifestEntry::File {
                name: name.to_string(),
                revision: RevisionRef::new(meta.revision, node.clone()),
                mtime: meta.mtime,
                size: meta.size,
            }
        };
        visit(entry)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn list(backend: &MemoryBackend, path: &str) -> Vec<ManifestEntry> {
        let tip = backend.resolve_revision(b"").unwrap();
        let mut entries = Vec::new();
        each_entry(backend, &tip, path, encoding_rs::UTF_8, |e| {
            entries.push(e);
            Ok(())
        })
        .unwrap();
        entries
    }

    fn names(entries: &[ManifestEntry]) -> Vec<(bool, &str)> {
        entries.iter().map(|e| (e.is_directory(), e.name())).collect()
    }

    #[test]
    fn prefix_normalization() {
        assert_eq!(manifest_prefix(""), "");
        assert_eq!(manifest_prefix("/"), "");
        assert_eq!(manifest_prefix("lib"), "lib/");
        assert_eq!(manifest_prefix("lib//"), "lib/");
        assert_eq!(manifest_prefix("/lib/sub/"), "lib/sub/");
    }

    #[test]
    fn lists_files_and_collapses_subdirectories() {
        let mut backend = MemoryBackend::new("/repo");
        backend.commit(
            100,
            &[
                ("README", "readme"),
                ("lib/a.rb", "a"),
                ("lib/b.rb", "bb"),
                ("lib/sub/c.rb", "c"),
                ("lib/sub/d.rb", "d"),
            ],
        );

        let entries = list(&backend, "lib");
        assert_eq!(
            names(&entries),
            [(false, "a.rb"), (false, "b.rb"), (true, "sub")]
        );
        match &entries[1] {
            ManifestEntry::File {
                revision, mtime, size, ..
            } => {
                assert_eq!((revision.number, *mtime, *size), (0, 100, 2));
            }
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn root_listing_uses_empty_prefix() {
        let mut backend = MemoryBackend::new("/repo");
        backend.commit(1, &[("README", "r"), ("lib/a.rb", "a"), ("zz", "z")]);

        assert_eq!(
            names(&list(&backend, "")),
            [(false, "README"), (true, "lib"), (false, "zz")]
        );
        assert_eq!(names(&list(&backend, "/")), names(&list(&backend, "")));
    }

    #[test]
    fn order_follows_full_path_not_child_name() {
        let mut backend = MemoryBackend::new("/repo");
        // "a-b" sorts before "a/x" because '-' < '/', but "a" < "a-b" as names.
        backend.commit(1, &[("a-b", "1"), ("a/x", "2")]);

        assert_eq!(
            names(&list(&backend, "")),
            [(false, "a-b"), (true, "a")]
        );
    }

    #[test]
    fn first_classification_wins() {
        let mut backend = MemoryBackend::new("/repo");
        backend.commit(1, &[("doc", "file"), ("doc/x", "nested")]);

        assert_eq!(names(&list(&backend, "")), [(false, "doc")]);
    }

    #[test]
    fn prefix_must_match_whole_segment() {
        let mut backend = MemoryBackend::new("/repo");
        backend.commit(1, &[("lib/a", "1"), ("library/b", "2")]);

        assert_eq!(names(&list(&backend, "lib")), [(false, "a")]);
        assert!(list(&backend, "missing").is_empty());
    }

    #[test]
    fn file_revision_is_where_content_last_changed() {
        let mut backend = MemoryBackend::new("/repo");
        backend.commit(10, &[("a", "v1"), ("b", "v1")]);
        backend.commit(20, &[("a", "v1"), ("b", "v2")]);

        let revisions: Vec<_> = list(&backend, "")
            .into_iter()
            .map(|e| match e {
                ManifestEntry::File { revision, mtime, .. } => (revision.number, mtime),
                ManifestEntry::Directory { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(revisions, [(0, 10), (1, 20)]);
    }

    #[test]
    fn paths_are_decoded_with_configured_encoding() {
        let mut backend = MemoryBackend::new("/repo");
        backend.commit(1, &[("docs/caf\u{e9}.txt", "x")]);
        let tip = backend.resolve_revision(b"").unwrap();

        let listed = |encoding: &'static Encoding| {
            let mut entries = Vec::new();
            each_entry(&backend, &tip, "docs", encoding, |e| {
                entries.push(e.name().to_string());
                Ok(())
            })
            .unwrap();
            entries
        };
        assert_eq!(listed(encoding_rs::UTF_8), ["café.txt"]);
        assert_eq!(listed(encoding_rs::WINDOWS_1252), ["cafÃ©.txt"]);
    }
}

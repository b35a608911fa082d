//! Report generation.
//!
//! - `resolver`: revision spec → RevisionRef
//! - `tags`: tag rows, newest-defined first
//! - `branches`: live branch rows, newest tip first
//! - `manifest`: one-level directory listing
//! - `serializer`: streaming XML writer with guaranteed outer closing tags
//!
//! Each report performs one read pass over the backend and writes rows as
//! they are produced.

pub mod branches;
pub mod manifest;
pub mod resolver;
pub mod serializer;
pub mod tags;

pub use serializer::{ReportKind, ReportSerializer, SerializerState, write_report};

use std::io::Write;

use tracing::debug;

use crate::backend::Backend;
use crate::codec::{decode_text, unquote_plus};
use crate::config::ReportConfig;
use crate::error::Result;

/// Writes an `rhsummary` document: tip, tags, then live branches.
pub fn write_summary<W: Write>(backend: &dyn Backend, out: &mut W) -> Result<()> {
    write_report(out, ReportKind::Summary, &backend.root(), |report| {
        let tip = resolver::resolve_tip(backend)?;
        report.tip(&tip)?;
        tags::each_tag(backend, |tag| report.tag(&tag))?;
        branches::each_branch(backend, |branch| report.branch(&branch))?;
        debug!(tip = tip.number, "summary written");
        Ok(())
    })
}

/// Writes an `rhmanifest` document for `raw_path` at `raw_rev`.
///
/// Both arguments arrive as request fields: percent-encoded, `+` for space.
pub fn write_manifest<W: Write>(
    backend: &dyn Backend,
    config: &ReportConfig,
    raw_rev: &[u8],
    raw_path: &[u8],
    out: &mut W,
) -> Result<()> {
    write_report(out, ReportKind::Manifest, &backend.root(), |report| {
        let path = decode_text(&unquote_plus(raw_path), config.path_encoding)?;
        let revision = resolver::resolve_revision(backend, &unquote_plus(raw_rev))?;

        report.begin_manifest(&revision, &path)?;
        let mut count = 0usize;
        manifest::each_entry(backend, &revision, &path, config.path_encoding, |entry| {
            count += 1;
            report.entry(&entry)
        })?;
        report.end_manifest()?;
        debug!(revision = revision.number, path = %path, entries = count, "manifest written");
        Ok(())
    })
}

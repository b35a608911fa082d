//! Streaming XML writer for report documents.
//!
//! A report is opened (declaration, root and repository elements), receives
//! rows, and is closed. [`write_report`] writes the two outer closing tags
//! even when the body fails; anything the body left half-written stays as is
//! and the body's error is returned.

use std::io::Write;

use crate::codec::{escape, quote_escape};
use crate::error::Result;
use crate::models::{Branch, ManifestEntry, RevisionRef, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Manifest,
}

impl ReportKind {
    pub fn root_element(self) -> &'static str {
        match self {
            ReportKind::Summary => "rhsummary",
            ReportKind::Manifest => "rhmanifest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerState {
    Opened,
    Body,
    Closed,
}

pub struct ReportSerializer<'w, W: Write> {
    out: &'w mut W,
    kind: ReportKind,
    state: SerializerState,
}

impl<'w, W: Write> ReportSerializer<'w, W> {
    /// Writes the XML declaration, the root element and the repository element.
    pub fn open(out: &'w mut W, kind: ReportKind, root: &[u8]) -> Result<Self> {
        writeln!(out, r#"<?xml version="1.0"?>"#)?;
        writeln!(out, "<{}>", kind.root_element())?;
        writeln!(out, r#"<repository root="{}">"#, quote_escape(root))?;
        Ok(Self {
            out,
            kind,
            state: SerializerState::Opened,
        })
    }

    pub fn state(&self) -> SerializerState {
        self.state
    }

    pub fn tip(&mut self, tip: &RevisionRef) -> Result<()> {
        self.row(format_args!(
            r#"<tip revision="{}" node="{}"/>"#,
            tip.number,
            escape(tip.hash.as_str())
        ))
    }

    pub fn tag(&mut self, tag: &Tag) -> Result<()> {
        self.row(format_args!(
            r#"<tag revision="{}" node="{}" name="{}"/>"#,
            tag.revision.number,
            escape(tag.revision.hash.as_str()),
            quote_escape(&tag.name)
        ))
    }

    pub fn branch(&mut self, branch: &Branch) -> Result<()> {
        self.row(format_args!(
            r#"<branch revision="{}" node="{}" name="{}"/>"#,
            branch.revision.number,
            escape(branch.revision.hash.as_str()),
            quote_escape(&branch.name)
        ))
    }

    pub fn begin_manifest(&mut self, revision: &RevisionRef, path: &str) -> Result<()> {
        self.row(format_args!(
            r#"<manifest revision="{}" path="{}">"#,
            revision.number,
            quote_escape(path.as_bytes())
        ))
    }

    pub fn entry(&mut self, entry: &ManifestEntry) -> Result<()> {
        match entry {
            ManifestEntry::Directory { name } => {
                self.row(format_args!(r#"<dir name="{}"/>"#, quote_escape(name.as_bytes())))
            }
            ManifestEntry::File {
                name,
                revision,
                mtime,
                size,
            } => self.row(format_args!(
                r#"<file name="{}" revision="{}" node="{}" time="{}" size="{}"/>"#,
                quote_escape(name.as_bytes()),
                revision.number,
                escape(revision.hash.as_str()),
                mtime,
                size
            )),
        }
    }

    pub fn end_manifest(&mut self) -> Result<()> {
        self.row(format_args!("</manifest>"))
    }

    /// Writes the repository and root closing tags. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.state == SerializerState::Closed {
            return Ok(());
        }
        self.state = SerializerState::Closed;
        writeln!(self.out, "</repository>")?;
        writeln!(self.out, "</{}>", self.kind.root_element())?;
        Ok(())
    }

    fn row(&mut self, line: std::fmt::Arguments<'_>) -> Result<()> {
        debug_assert!(self.state != SerializerState::Closed, "row after close");
        self.state = SerializerState::Body;
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}

/// Opens a report on `out`, runs `body`, and closes the report whatever the
/// body returned. The body's error takes precedence over a close failure.
pub fn write_report<W, F>(out: &mut W, kind: ReportKind, root: &[u8], body: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut ReportSerializer<'_, W>) -> Result<()>,
{
    let mut report = ReportSerializer::open(out, kind, root)?;
    let result = body(&mut report);
    let closed = report.close();
    result?;
    closed
}

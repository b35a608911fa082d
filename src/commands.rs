//! Command table shared by the CLI and the HTTP surface.
//!
//! The table is a `static` slice built at compile time. Both front ends look
//! commands up by name and hand over the raw, still percent-encoded request
//! fields; decoding happens inside the report code.

use std::io::Write;

use crate::backend::Backend;
use crate::config::ReportConfig;
use crate::error::{AppError, Result};
use crate::report;

/// Request fields as they arrive on the wire: percent-encoded, `+` for space.
#[derive(Debug, Clone, Default)]
pub struct CommandRequest {
    pub rev: Vec<u8>,
    pub path: Vec<u8>,
}

impl CommandRequest {
    /// Parses an undecoded `key=value&...` query string. Values are kept
    /// encoded; unknown keys are ignored and the last occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let mut request = Self::default();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "rev" | "r" => request.rev = value.as_bytes().to_vec(),
                "path" => request.path = value.as_bytes().to_vec(),
                _ => {}
            }
        }
        request
    }
}

pub type Handler =
    fn(&dyn Backend, &ReportConfig, &CommandRequest, &mut dyn Write) -> Result<()>;

pub struct Command {
    pub name: &'static str,
    pub handler: Handler,
}

pub static COMMANDS: &[Command] = &[
    Command {
        name: "rhsummary",
        handler: run_summary,
    },
    Command {
        name: "rhmanifest",
        handler: run_manifest,
    },
];

pub fn find(name: &str) -> Result<&'static Command> {
    COMMANDS
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| AppError::UnknownCommand(name.to_string()))
}

fn run_summary(
    backend: &dyn Backend,
    _config: &ReportConfig,
    _request: &CommandRequest,
    mut out: &mut dyn Write,
) -> Result<()> {
    report::write_summary(backend, &mut out)
}

fn run_manifest(
    backend: &dyn Backend,
    config: &ReportConfig,
    request: &CommandRequest,
    mut out: &mut dyn Write,
) -> Result<()> {
    report::write_manifest(backend, config, &request.rev, &request.path, &mut out)
}

//! Deployment-level report settings.
//!
//! The only knob is the character set used to interpret file paths, both the
//! ones arriving in requests and the ones stored in the repository. It is
//! resolved once at startup so a bad label fails before any report output.

use encoding_rs::Encoding;

use crate::error::{AppError, Result};

pub const DEFAULT_PATH_ENCODING: &str = "utf-8";

#[derive(Debug, Clone, Copy)]
pub struct ReportConfig {
    pub path_encoding: &'static Encoding,
}

impl ReportConfig {
    pub fn new(path_encoding: &str) -> Result<Self> {
        let label = path_encoding.trim();
        let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
            AppError::Configuration(format!("unknown path encoding '{}'", label))
        })?;
        Ok(Self {
            path_encoding: encoding,
        })
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path_encoding: encoding_rs::UTF_8,
        }
    }
}

//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for every fatal condition a report can hit and implements
//! Axum's `IntoResponse` so the HTTP surface turns errors into JSON bodies.
//!
//! Error mappings:
//! - `RepoNotFound`, `NotFound`, `UnknownCommand` → 404
//! - `InvalidPath`, `Configuration` → 400
//! - `Git`, `Io`, `Internal` → 500
//!
//! Unresolvable tags and stale branch tips are not errors: the enumerators
//! drop those rows silently.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Unknown revision: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds a `NotFound` from a raw revision spec, which may not be UTF-8.
    pub fn revision_not_found(spec: &[u8]) -> Self {
        AppError::NotFound(String::from_utf8_lossy(spec).into_owned())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::RepoNotFound(_) | AppError::NotFound(_) | AppError::UnknownCommand(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidPath(_) | AppError::Configuration(_) => StatusCode::BAD_REQUEST,
            AppError::Git(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

//! Report endpoints.
//!
//! - GET /api/v1/{command}?rev=REV&path=PATH
//!   Runs a command from the command table against a freshly opened
//!   repository and returns the XML report. The query string is handed over
//!   undecoded, so `rev` and `path` follow the same percent/`+` rules as on
//!   the command line.

use axum::{
    Router,
    extract::{Path, RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use super::SharedState;
use crate::commands::{self, CommandRequest};
use crate::error::Result;
use crate::git::GitRepository;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/{command}", get(run_command))
        .with_state(state)
}

async fn run_command(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    let request = CommandRequest::from_query(query.as_deref().unwrap_or(""));
    let body = render(&state, &name, &request).inspect_err(|e| {
        warn!(command = %name, error = %e, "report failed");
    })?;
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response())
}

fn render(state: &super::ServerState, name: &str, request: &CommandRequest) -> Result<Vec<u8>> {
    let command = commands::find(name)?;
    let repo = GitRepository::open(&state.repo_path)?;
    let mut body = Vec::new();
    (command.handler)(&repo, &state.config, request, &mut body)?;
    Ok(body)
}

//! HTTP surface for report consumers.
//!
//! - `commands`: one endpoint per command-table entry

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;

use crate::config::ReportConfig;

pub struct ServerState {
    pub repo_path: PathBuf,
    pub config: ReportConfig,
}

pub type SharedState = Arc<ServerState>;

pub fn create_router(state: SharedState) -> Router {
    Router::new().merge(commands::routes(state))
}

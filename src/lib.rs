//! Repository summary and manifest reports for project-management front ends.
//!
//! One command yields one XML document describing repository state (tip,
//! tags, live branches) or one level of a directory listing at a revision,
//! so a web application can enumerate a repository without spawning a VCS
//! process per query.
//!
//! - `backend`: read-only repository capabilities, plus an in-memory backend
//! - `git`: git2-backed `Backend`
//! - `report`: resolver, enumerators, manifest lister, serializer
//! - `codec`: request decoding and attribute encoding
//! - `commands`: static command table shared by CLI and HTTP
//! - `routes`: axum endpoints

pub mod backend;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod models;
pub mod report;
pub mod routes;

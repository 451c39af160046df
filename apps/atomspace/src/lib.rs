//! # atomspace
//!
//! HTTP server and CLI around [`atomspace_core`].
//!
//! - `api` → axum router, handlers and security middleware
//! - `cli` → clap commands
//! - `config` → layered TOML/env configuration
//! - `scheduler` → tokio task driving the agent registry

pub mod api;
pub mod cli;
pub mod config;
pub mod scheduler;

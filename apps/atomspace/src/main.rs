//! # AtomSpace - Hypergraph Store Server
//!
//! The main binary for the AtomSpace in-memory hypergraph store.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - Truth-value inference endpoints
//! - Agent scheduler
//! - CLI interface
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   apps/atomspace (THE BINARY)                   │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐     │
//! │  │   CLI       │    │   HTTP API  │    │    Scheduler     │     │
//! │  │  (clap)     │    │   (axum)    │    │  (tokio task)    │     │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘     │
//! │         │                  │                    │               │
//! │         └──────────────────┼────────────────────┘               │
//! │                            ▼                                    │
//! │                    ┌────────────────┐                           │
//! │                    │ atomspace-core │                           │
//! │                    │  (THE STORE)   │                           │
//! │                    └────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! atomspace server --host 0.0.0.0 --port 8100
//!
//! # Offline inference
//! atomspace infer deduction 0.9,0.8 0.8,0.7
//!
//! # Effective configuration
//! atomspace --config atomspace.toml config
//! ```

use atomspace::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // ATOMSPACE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ATOMSPACE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "atomspace=debug,atomspace_core=debug,tower_http=debug"
    } else {
        "atomspace=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!(kind = e.kind(), "Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the AtomSpace startup banner.
fn print_banner() {
    println!(
        r#"
   ___  __                  ____
  / _ |/ /____  __ _  ___ / __/__  ___ ________
 / __ / __/ _ \/  ' \(_-<_\ \/ _ \/ _ `/ __/ -_)
/_/ |_\__/\___/_/_/_/___/___/ .__/\_,_/\__/\__/
                           /_/

  Hypergraph Store v{}

  Atoms • Links • Truth Values
"#,
        env!("CARGO_PKG_VERSION")
    );
}

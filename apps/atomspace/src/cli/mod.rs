//! # AtomSpace CLI Module
//!
//! This module implements the CLI interface for AtomSpace.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default)
//! - `infer` - Evaluate one truth-value rule offline
//! - `config` - Print the effective configuration

mod commands;

use crate::config::Config;
use atomspace_core::AtomSpaceError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// AtomSpace - in-memory hypergraph store
///
/// Typed atoms, typed links over them, probabilistic truth values and
/// pattern queries over HTTP.
#[derive(Parser, Debug)]
#[command(name = "atomspace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config and ATOMSPACE_HOST)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config and ATOMSPACE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Apply a truth-value rule to premises given as STRENGTH,CONFIDENCE
    Infer {
        /// Rule name (deduction, induction, abduction, conjunction,
        /// disjunction, negation, revision)
        rule: String,

        /// One premise for negation, two for every other rule
        #[arg(required = true, num_args = 1..=2)]
        premises: Vec<String>,
    },

    /// Print the effective configuration
    Config,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AtomSpaceError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Infer { rule, premises }) => cmd_infer(&rule, &premises, json_mode),
        Some(Commands::Config) => {
            let config = Config::load(cli.config.as_deref())?;
            cmd_config(&config, json_mode)
        }
        None => {
            // No subcommand - serve with the loaded configuration
            let config = Config::load(cli.config.as_deref())?;
            cmd_server(&config).await
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

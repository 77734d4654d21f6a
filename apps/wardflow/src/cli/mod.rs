//! # Wardflow CLI Module
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default)
//! - `snapshot` - Print the start-up dashboard snapshot
//! - `simulate` - Run the flow engine offline for a number of ticks

mod commands;

use crate::config::Settings;
use crate::error::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Wardflow - hospital operations dashboard backend
///
/// Tracks patients through the care stages, advances and balances them,
/// and serves the dashboard JSON API.
#[derive(Parser, Debug)]
#[command(name = "wardflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// TOML config file
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
        /// Host to bind to [default: 127.0.0.1]
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to [default: 8080]
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed for a reproducible random stream
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the start-up dashboard snapshot
    Snapshot,

    /// Run ticks offline: simulate, advance, then balance
    Simulate {
        /// Number of ticks
        #[arg(short, long, default_value = "10")]
        ticks: u32,

        /// Seed for a reproducible random stream
        #[arg(short, long)]
        seed: Option<u64>,

        /// Force automatic flow mode
        #[arg(short, long)]
        auto: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port, seed }) => {
            settings.apply_flags(host, port, seed);
            cmd_server(&settings).await
        }
        Some(Commands::Snapshot) => cmd_snapshot(&settings, json_mode),
        Some(Commands::Simulate { ticks, seed, auto }) => {
            settings.apply_flags(None, None, seed);
            if auto {
                settings.auto = true;
            }
            cmd_simulate(&settings, ticks, json_mode)
        }
        None => cmd_server(&settings).await,
    }
}

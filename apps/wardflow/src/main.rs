//! # Wardflow - Hospital Operations Dashboard
//!
//! The main binary: the dashboard JSON API plus offline commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │               apps/wardflow (THE BINARY)          │
//! │                                                   │
//! │   ┌─────────────┐              ┌─────────────┐    │
//! │   │    CLI      │              │  HTTP API   │    │
//! │   │   (clap)    │              │   (axum)    │    │
//! │   └──────┬──────┘              └──────┬──────┘    │
//! │          │   config (toml + env)      │           │
//! │          └─────────────┬──────────────┘           │
//! │                        ▼                          │
//! │                ┌───────────────┐                  │
//! │                │ wardflow-core │                  │
//! │                │  (Hospital)   │                  │
//! │                └───────────────┘                  │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! wardflow server --host 0.0.0.0 --port 8080
//!
//! # Offline
//! wardflow snapshot --json-mode
//! wardflow simulate --ticks 20 --seed 7 --auto
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardflow::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // WARDFLOW_LOG_FORMAT=json switches to machine-parseable output.
    let log_format = std::env::var("WARDFLOW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wardflow=info,tower_http=debug".into());

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

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_banner() {
    println!(
        r#"
  ██╗    ██╗ █████╗ ██████╗ ██████╗ ███████╗██╗      ██████╗ ██╗    ██╗
  ██║    ██║██╔══██╗██╔══██╗██╔══██╗██╔════╝██║     ██╔═══██╗██║    ██║
  ██║ █╗ ██║███████║██████╔╝██║  ██║█████╗  ██║     ██║   ██║██║ █╗ ██║
  ██║███╗██║██╔══██║██╔══██╗██║  ██║██╔══╝  ██║     ██║   ██║██║███╗██║
  ╚███╔███╔╝██║  ██║██║  ██║██████╔╝██║     ███████╗╚██████╔╝╚███╔███╔╝
   ╚══╝╚══╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝ ╚═╝     ╚══════╝ ╚═════╝  ╚══╝╚══╝

  Hospital Operations Dashboard v{}

  Reception to Discharge, one stage at a time
"#,
        env!("CARGO_PKG_VERSION")
    );
}

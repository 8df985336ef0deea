//! # Sentinet - Energy Sentiment Network Server
//!
//! The main binary for the Sentinet co-occurrence network engine.
//!
//! This application provides:
//! - HTTP API server (axum-based) feeding the dashboard's network view
//! - CLI interface for one-off builds and configuration checks
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 apps/sentinet (THE BINARY)              │
//! │                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌────────────┐  │
//! │  │   CLI       │    │   HTTP API  │    │  Records   │  │
//! │  │  (clap)     │    │   (axum)    │    │  + Config  │  │
//! │  └──────┬──────┘    └──────┬──────┘    └─────┬──────┘  │
//! │         │                  │                 │         │
//! │         └──────────────────┼─────────────────┘         │
//! │                            ▼                           │
//! │                    ┌───────────────┐                   │
//! │                    │ sentinet-core │                   │
//! │                    │  (THE LOGIC)  │                   │
//! │                    └───────────────┘                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! sentinet --records comments.json serve --host 0.0.0.0 --port 8080
//!
//! # One-off build
//! sentinet --records comments.json build --energy solar,wind --sentiment negative
//! ```

use clap::Parser;
use sentinet::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // SENTINET_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SENTINET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sentinet=info,sentinet_core=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner to stderr so `build` output stays clean JSON.
fn print_banner() {
    eprintln!(
        r#"
  ┌─┐┌─┐┌┐┌┌┬┐┬┌┐┌┌─┐┌┬┐
  └─┐├┤ │││ │ ││││├┤  │
  └─┘└─┘┘└┘ ┴ ┴┘└┘└─┘ ┴

  Energy Sentiment Network Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}

//! # Sentinet CLI Module
//!
//! This module implements the CLI interface for Sentinet.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `build` - Compute one network and print its render payload
//! - `check-config` - Validate the configuration and record source

mod commands;

use crate::error::AppError;
use clap::{Parser, Subcommand};
use sentinet_core::{EnergySelection, NetworkSelection, SentimentSelection};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Sentinet - Energy Sentiment Network Server
///
/// Builds keyword co-occurrence networks over energy comments and lays them
/// out for the dashboard.
#[derive(Parser, Debug)]
#[command(name = "sentinet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "sentinet.toml")]
    pub config: PathBuf,

    /// JSON record file, overrides `records.path` from the configuration
    #[arg(short, long, global = true)]
    pub records: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Compute one network and print the render payload as JSON
    Build {
        /// Energy keywords: "all" or a comma-separated list
        #[arg(short, long, default_value = "all", value_parser = parse_energy)]
        energy: EnergySelection,

        /// Sentiment words: all, positive or negative
        #[arg(short, long, default_value = "all", value_parser = parse_sentiment)]
        sentiment: SentimentSelection,

        /// Write the payload to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration and records, then print a summary
    CheckConfig,
}

/// Parse `all` or a comma-separated keyword list.
pub fn parse_energy(value: &str) -> Result<EnergySelection, String> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(EnergySelection::All);
    }
    let keywords: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();
    if keywords.is_empty() {
        return Err("expected \"all\" or at least one keyword".to_string());
    }
    Ok(EnergySelection::Only(keywords))
}

/// Parse `all`, `positive` or `negative`.
pub fn parse_sentiment(value: &str) -> Result<SentimentSelection, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "all" | "both" => Ok(SentimentSelection::Both),
        "positive" => Ok(SentimentSelection::Positive),
        "negative" => Ok(SentimentSelection::Negative),
        other => Err(format!(
            "unknown sentiment filter '{}', expected all, positive or negative",
            other
        )),
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let records = cli.records.as_deref();

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(&cli.config, records, &host, port).await,
        Some(Commands::Build {
            energy,
            sentiment,
            output,
        }) => cmd_build(
            &cli.config,
            records,
            &NetworkSelection::new(energy, sentiment),
            output.as_deref(),
        ),
        Some(Commands::CheckConfig) | None => cmd_check_config(&cli.config, records),
    }
}

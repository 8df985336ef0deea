//! # Application Errors
//!
//! Everything that can go wrong outside the core: reading files, parsing
//! configuration and records, binding the server.

use sentinet_core::SentinetError;
use thiserror::Error;

/// Errors raised by the Sentinet binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// The core rejected a configuration or selection.
    #[error(transparent)]
    Core(#[from] SentinetError),

    /// The configuration file is unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File or socket I/O failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The record source is malformed.
    #[error("Record error: {0}")]
    Records(String),
}

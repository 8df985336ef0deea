//! # sentinet
//!
//! The Sentinet binary crate: configuration, record loading, the CLI and the
//! HTTP API around `sentinet-core`.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod records;

pub use error::AppError;

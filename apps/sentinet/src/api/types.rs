//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use sentinet_core::{EnergySelection, LayoutConfig, NetworkSelection, SentimentSelection};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
}

impl HealthResponse {
    #[must_use]
    pub fn ok(records: usize) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            records,
        }
    }
}

// =============================================================================
// CONFIG RESPONSE
// =============================================================================

/// Keyword lists and layout settings the dashboard builds its controls from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub energy: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub layout: LayoutConfig,
}

// =============================================================================
// NETWORK REQUEST
// =============================================================================

/// Energy filter: `"all"`, a single keyword, or a keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnergyParam {
    One(String),
    Many(Vec<String>),
}

impl Default for EnergyParam {
    fn default() -> Self {
        Self::One("all".to_string())
    }
}

impl From<EnergyParam> for EnergySelection {
    fn from(param: EnergyParam) -> Self {
        match param {
            EnergyParam::One(word) if word.eq_ignore_ascii_case("all") => EnergySelection::All,
            EnergyParam::One(word) => EnergySelection::Only(vec![word]),
            EnergyParam::Many(words) => EnergySelection::Only(words),
        }
    }
}

/// Sentiment filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentParam {
    #[default]
    #[serde(alias = "both")]
    All,
    Positive,
    Negative,
}

impl From<SentimentParam> for SentimentSelection {
    fn from(param: SentimentParam) -> Self {
        match param {
            SentimentParam::All => SentimentSelection::Both,
            SentimentParam::Positive => SentimentSelection::Positive,
            SentimentParam::Negative => SentimentSelection::Negative,
        }
    }
}

/// Network request. Both filters default to `"all"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkRequest {
    #[serde(default)]
    pub energy: EnergyParam,
    #[serde(default)]
    pub sentiment: SentimentParam,
}

impl NetworkRequest {
    /// The filter key of this request.
    #[must_use]
    pub fn selection(&self) -> NetworkSelection {
        NetworkSelection::new(self.energy.clone().into(), self.sentiment.into())
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

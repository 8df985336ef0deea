//! # Record Source
//!
//! Loads text records from a JSON array:
//!
//! ```json
//! [
//!   { "text": "Solar growth in the outback", "category": "Australia", "sentiment": 0.6 },
//!   { "text": null, "category": "UK" }
//! ]
//! ```
//!
//! A record without `sentiment` is scored with the lexicon scorer. The loaded
//! set can be down-sampled with a seeded RNG.

use crate::error::AppError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sentinet_core::{SentimentScorer, TextRecord};
use serde::Deserialize;
use std::path::Path;

/// Maximum record file size (100 MB).
const MAX_RECORD_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// One record as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    sentiment: Option<f64>,
}

impl RawRecord {
    fn into_record<S: SentimentScorer + ?Sized>(self, scorer: &S) -> TextRecord {
        match self.sentiment {
            Some(score) => TextRecord {
                text: self.text,
                category: self.category,
                sentiment: 0.0,
            }
            .with_sentiment(score),
            None => TextRecord::scored(self.text, self.category, scorer),
        }
    }
}

/// Parse a JSON record array.
pub fn parse_records<S: SentimentScorer + ?Sized>(
    source: &str,
    scorer: &S,
) -> Result<Vec<TextRecord>, AppError> {
    let raw: Vec<RawRecord> =
        serde_json::from_str(source).map_err(|e| AppError::Records(e.to_string()))?;
    Ok(raw.into_iter().map(|r| r.into_record(scorer)).collect())
}

/// Read and parse a JSON record file.
pub fn load_records<S: SentimentScorer + ?Sized>(
    path: &Path,
    scorer: &S,
) -> Result<Vec<TextRecord>, AppError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| AppError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    if !metadata.is_file() {
        return Err(AppError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_RECORD_FILE_SIZE {
        return Err(AppError::Records(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_RECORD_FILE_SIZE
        )));
    }

    let source = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    let records = parse_records(&source, scorer)?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Keep `round(len * fraction)` records chosen with a seeded RNG.
///
/// The kept records stay in their original order.
pub fn sample_records(records: Vec<TextRecord>, fraction: f64, seed: u64) -> Vec<TextRecord> {
    if fraction >= 1.0 {
        return records;
    }
    let total = records.len();
    let amount = ((total as f64) * fraction.max(0.0)).round() as usize;
    let amount = amount.min(total);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut keep = rand::seq::index::sample(&mut rng, total, amount).into_vec();
    keep.sort_unstable();

    let mut keep = keep.into_iter().peekable();
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| {
            if keep.peek() == Some(&i) {
                keep.next();
                Some(record)
            } else {
                None
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

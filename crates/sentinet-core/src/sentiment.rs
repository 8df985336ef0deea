//! # Sentiment Scoring
//!
//! The compound sentiment of a text is supplied from outside the core. This
//! module defines the seam (`SentimentScorer`) and a small lexicon fallback
//! built from the configured sentiment word lists.

use crate::keywords::KeywordConfig;
use crate::matcher::LoweredText;
use crate::types::clamp_compound;
use crate::TextRecord;

/// Normalization constant of the compound score, as used by VADER.
const COMPOUND_ALPHA: f64 = 15.0;

/// A pure function from text to a compound score in `[-1, 1]`.
pub trait SentimentScorer {
    /// Score one non-missing text.
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Scores a text by counting positive and negative list words.
///
/// `raw = positives - negatives`, `compound = raw / sqrt(raw² + 15)`.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl LexiconScorer {
    /// Build a scorer from the sentiment lists of a keyword configuration.
    #[must_use]
    pub fn from_keywords(config: &KeywordConfig) -> Self {
        Self {
            positive: config.positive().as_slice().to_vec(),
            negative: config.negative().as_slice().to_vec(),
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let lowered = LoweredText::new(Some(text));
        let positives = lowered.matches(self.positive.iter().map(String::as_str)).len() as f64;
        let negatives = lowered.matches(self.negative.iter().map(String::as_str)).len() as f64;
        let raw = positives - negatives;
        raw / (raw * raw + COMPOUND_ALPHA).sqrt()
    }
}

impl TextRecord {
    /// Build a record scored by `scorer`. Missing text is neutral.
    pub fn scored<S: SentimentScorer + ?Sized>(
        text: Option<String>,
        category: impl Into<String>,
        scorer: &S,
    ) -> Self {
        let sentiment = text.as_deref().map_or(0.0, |t| clamp_compound(scorer.score(t)));
        Self {
            text,
            category: category.into(),
            sentiment,
        }
    }
}

/// Mean sentiment of a set of records, `None` when there are none.
#[must_use]
pub fn mean_sentiment(records: &[&TextRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.sentiment).sum();
    Some(total / records.len() as f64)
}

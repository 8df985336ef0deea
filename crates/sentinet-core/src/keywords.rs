//! # Keyword Configuration
//!
//! Validated keyword groups and the filter selection made by the UI.
//!
//! - Keywords are lowercased at construction
//! - Empty keywords and duplicates (within or across groups) are rejected
//! - Nothing is silently deduplicated

use crate::primitives::{MAX_KEYWORD_LENGTH, MAX_KEYWORDS_PER_GROUP};
use crate::{NodeKind, SentinetError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// KEYWORD GROUPS
// =============================================================================

/// The named keyword groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordGroup {
    Energy,
    Positive,
    Negative,
}

impl KeywordGroup {
    /// Group name as used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            KeywordGroup::Energy => "energy",
            KeywordGroup::Positive => "positive",
            KeywordGroup::Negative => "negative",
        }
    }

    /// Node kind created for keywords of this group.
    #[must_use]
    pub const fn node_kind(self) -> NodeKind {
        match self {
            KeywordGroup::Energy => NodeKind::Energy,
            KeywordGroup::Positive => NodeKind::SentimentPositive,
            KeywordGroup::Negative => NodeKind::SentimentNegative,
        }
    }
}

/// An ordered sequence of distinct lowercase keywords.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    /// Build a set, lowercasing every keyword.
    ///
    /// # Errors
    /// `InvalidInput` on an empty keyword, an over-long keyword, too many
    /// keywords, or a duplicate after lowercasing.
    pub fn new<I, S>(group: KeywordGroup, words: I) -> Result<Self, SentinetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in words {
            let word = raw.as_ref().to_lowercase();
            if word.trim().is_empty() {
                return Err(SentinetError::invalid(format!(
                    "empty keyword in group '{}'",
                    group.name()
                )));
            }
            if word.len() > MAX_KEYWORD_LENGTH {
                return Err(SentinetError::invalid(format!(
                    "keyword '{}' in group '{}' exceeds {} bytes",
                    word,
                    group.name(),
                    MAX_KEYWORD_LENGTH
                )));
            }
            if out.contains(&word) {
                return Err(SentinetError::invalid(format!(
                    "duplicate keyword '{}' in group '{}'",
                    word,
                    group.name()
                )));
            }
            out.push(word);
        }

        if out.len() > MAX_KEYWORDS_PER_GROUP {
            return Err(SentinetError::invalid(format!(
                "group '{}' has {} keywords, limit is {}",
                group.name(),
                out.len(),
                MAX_KEYWORDS_PER_GROUP
            )));
        }

        Ok(Self { words: out })
    }

    /// Keywords in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Whether the set contains `word` (already lowercase).
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Keywords as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

// =============================================================================
// KEYWORD CONFIG
// =============================================================================

/// The three keyword groups, validated as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordConfig {
    energy: KeywordSet,
    positive: KeywordSet,
    negative: KeywordSet,
}

impl KeywordConfig {
    /// Validate and build a keyword configuration.
    ///
    /// # Errors
    /// `InvalidInput` if any group is malformed or a keyword appears in more
    /// than one group.
    pub fn new<S: AsRef<str>>(
        energy: &[S],
        positive: &[S],
        negative: &[S],
    ) -> Result<Self, SentinetError> {
        let energy = KeywordSet::new(KeywordGroup::Energy, energy)?;
        let positive = KeywordSet::new(KeywordGroup::Positive, positive)?;
        let negative = KeywordSet::new(KeywordGroup::Negative, negative)?;

        let mut seen: BTreeMap<&str, KeywordGroup> = BTreeMap::new();
        for (group, set) in [
            (KeywordGroup::Energy, &energy),
            (KeywordGroup::Positive, &positive),
            (KeywordGroup::Negative, &negative),
        ] {
            for word in set.iter() {
                if let Some(first) = seen.insert(word, group) {
                    return Err(SentinetError::invalid(format!(
                        "keyword '{}' appears in both '{}' and '{}'",
                        word,
                        first.name(),
                        group.name()
                    )));
                }
            }
        }

        Ok(Self {
            energy,
            positive,
            negative,
        })
    }

    /// Renewable energy keywords with the dashboard's sentiment word lists.
    #[must_use]
    pub fn renewable_defaults() -> Self {
        Self {
            energy: KeywordSet {
                words: to_owned(&["solar", "wind", "hydropower"]),
            },
            positive: KeywordSet {
                words: to_owned(&[
                    "growth",
                    "innovation",
                    "opportunity",
                    "progress",
                    "clean",
                    "advantage",
                ]),
            },
            negative: KeywordSet {
                words: to_owned(&[
                    "crisis",
                    "loss",
                    "failure",
                    "challenge",
                    "risk",
                    "pollution",
                ]),
            },
        }
    }

    #[must_use]
    pub fn energy(&self) -> &KeywordSet {
        &self.energy
    }

    #[must_use]
    pub fn positive(&self) -> &KeywordSet {
        &self.positive
    }

    #[must_use]
    pub fn negative(&self) -> &KeywordSet {
        &self.negative
    }

    /// The group a keyword belongs to, if any.
    #[must_use]
    pub fn group_of(&self, word: &str) -> Option<KeywordGroup> {
        if self.energy.contains(word) {
            Some(KeywordGroup::Energy)
        } else if self.positive.contains(word) {
            Some(KeywordGroup::Positive)
        } else if self.negative.contains(word) {
            Some(KeywordGroup::Negative)
        } else {
            None
        }
    }

    /// Resolve the energy selection against the configured list.
    ///
    /// # Errors
    /// `InvalidInput` when a selected keyword is not a configured energy keyword.
    pub fn resolve_energy(&self, selection: &EnergySelection) -> Result<Vec<String>, SentinetError> {
        match selection {
            EnergySelection::All => Ok(self.energy.as_slice().to_vec()),
            EnergySelection::Only(words) => {
                let mut resolved = Vec::with_capacity(words.len());
                for raw in words {
                    let word = raw.to_lowercase();
                    if !self.energy.contains(&word) {
                        return Err(SentinetError::invalid(format!(
                            "unknown energy keyword '{}'",
                            raw
                        )));
                    }
                    if !resolved.contains(&word) {
                        resolved.push(word);
                    }
                }
                Ok(resolved)
            }
        }
    }

    /// Sentiment words for a selection, positive list first, with their node kind.
    #[must_use]
    pub fn resolve_sentiment(&self, selection: SentimentSelection) -> Vec<(String, NodeKind)> {
        let mut words = Vec::new();
        if selection.includes_positive() {
            words.extend(
                self.positive
                    .iter()
                    .map(|w| (w.to_string(), NodeKind::SentimentPositive)),
            );
        }
        if selection.includes_negative() {
            words.extend(
                self.negative
                    .iter()
                    .map(|w| (w.to_string(), NodeKind::SentimentNegative)),
            );
        }
        words
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::renewable_defaults()
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

// =============================================================================
// SELECTION
// =============================================================================

/// Which energy keywords are active.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySelection {
    /// Every configured energy keyword.
    All,
    /// An explicit subset. May be empty, which yields an empty network.
    Only(Vec<String>),
}

/// Which sentiment lists are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentSelection {
    Positive,
    Negative,
    Both,
}

impl SentimentSelection {
    #[must_use]
    pub const fn includes_positive(self) -> bool {
        matches!(self, SentimentSelection::Positive | SentimentSelection::Both)
    }

    #[must_use]
    pub const fn includes_negative(self) -> bool {
        matches!(self, SentimentSelection::Negative | SentimentSelection::Both)
    }
}

/// The full filter selection. Also the key for superseding requests.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetworkSelection {
    pub energy: EnergySelection,
    pub sentiment: SentimentSelection,
}

impl NetworkSelection {
    #[must_use]
    pub fn new(energy: EnergySelection, sentiment: SentimentSelection) -> Self {
        Self { energy, sentiment }
    }

    /// All energy keywords, both sentiment lists (the dashboard default).
    #[must_use]
    pub fn all() -> Self {
        Self::new(EnergySelection::All, SentimentSelection::Both)
    }
}

impl Default for NetworkSelection {
    fn default() -> Self {
        Self::all()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_lowercased() {
        let set = KeywordSet::new(KeywordGroup::Energy, ["Solar", "WIND"]).expect("set");
        assert_eq!(set.as_slice(), &["solar".to_string(), "wind".to_string()]);
    }

    #[test]
    fn duplicate_in_group_rejected() {
        let result = KeywordSet::new(KeywordGroup::Energy, ["solar", "wind", "solar"]);
        assert!(matches!(result, Err(SentinetError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_after_lowercasing_rejected() {
        let result = KeywordSet::new(KeywordGroup::Positive, ["Clean", "clean"]);
        assert!(matches!(result, Err(SentinetError::InvalidInput(_))));
    }

    #[test]
    fn empty_keyword_rejected() {
        let result = KeywordSet::new(KeywordGroup::Negative, ["risk", "  "]);
        assert!(matches!(result, Err(SentinetError::InvalidInput(_))));
    }

    #[test]
    fn cross_group_duplicate_rejected() {
        let result = KeywordConfig::new(&["solar"], &["clean", "risk"], &["risk"]);
        match result {
            Err(SentinetError::InvalidInput(msg)) => {
                assert!(msg.contains("risk"));
                assert!(msg.contains("positive"));
                assert!(msg.contains("negative"));
            }
            other => unreachable!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn defaults_are_valid() {
        let defaults = KeywordConfig::renewable_defaults();
        let rebuilt = KeywordConfig::new(
            defaults.energy().as_slice(),
            defaults.positive().as_slice(),
            defaults.negative().as_slice(),
        )
        .expect("defaults validate");
        assert_eq!(defaults, rebuilt);
    }

    #[test]
    fn group_lookup() {
        let config = KeywordConfig::default();
        assert_eq!(config.group_of("wind"), Some(KeywordGroup::Energy));
        assert_eq!(config.group_of("clean"), Some(KeywordGroup::Positive));
        assert_eq!(config.group_of("loss"), Some(KeywordGroup::Negative));
        assert_eq!(config.group_of("coal"), None);
    }

    #[test]
    fn resolve_energy_rejects_unknown_keyword() {
        let config = KeywordConfig::default();
        let result = config.resolve_energy(&EnergySelection::Only(vec!["coal".into()]));
        assert!(matches!(result, Err(SentinetError::InvalidInput(_))));
    }

    #[test]
    fn resolve_energy_all_keeps_order() {
        let config = KeywordConfig::default();
        let resolved = config.resolve_energy(&EnergySelection::All).expect("resolve");
        assert_eq!(resolved, vec!["solar", "wind", "hydropower"]);
    }

    #[test]
    fn resolve_energy_empty_selection_is_valid() {
        let config = KeywordConfig::default();
        let resolved = config
            .resolve_energy(&EnergySelection::Only(Vec::new()))
            .expect("resolve");
        assert!(resolved.is_empty());
    }

    #[test]
    fn resolve_sentiment_by_selection() {
        let config = KeywordConfig::default();
        let positive = config.resolve_sentiment(SentimentSelection::Positive);
        assert_eq!(positive.len(), 6);
        assert!(positive.iter().all(|(_, k)| *k == NodeKind::SentimentPositive));

        let both = config.resolve_sentiment(SentimentSelection::Both);
        assert_eq!(both.len(), 12);
        assert_eq!(both[6], ("crisis".to_string(), NodeKind::SentimentNegative));
    }
}

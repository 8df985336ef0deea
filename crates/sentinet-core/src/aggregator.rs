//! # Frequency Aggregator
//!
//! Builds the filtered universe and counts keyword and category occurrences
//! over it.
//!
//! - A record qualifies if ANY selected energy keyword is a substring of its text
//! - A keyword is counted at most once per record
//! - An empty selection yields an empty universe and all-zero counts

use crate::TextRecord;
use crate::matcher::LoweredText;
use serde::Serialize;
use std::collections::BTreeMap;

/// Records whose text contains at least one of the selected energy keywords.
pub fn filter_universe<'r, S: AsRef<str>>(
    records: &'r [TextRecord],
    selected_energy: &[S],
) -> Vec<&'r TextRecord> {
    if selected_energy.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| {
            LoweredText::new(record.text()).contains_any(selected_energy.iter().map(AsRef::as_ref))
        })
        .collect()
}

/// Occurrence counts over a filtered universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    keywords: BTreeMap<String, usize>,
    categories: BTreeMap<String, usize>,
}

impl FrequencyTable {
    /// Count every keyword and category value over `universe`.
    ///
    /// Every keyword gets an entry, including those with zero matches.
    pub fn count<'a, I>(universe: &[&TextRecord], keywords: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self {
            keywords: keywords.into_iter().map(|k| (k.to_string(), 0)).collect(),
            categories: BTreeMap::new(),
        };

        for record in universe {
            let text = LoweredText::new(record.text());
            for (keyword, count) in &mut table.keywords {
                if text.contains(keyword) {
                    *count = count.saturating_add(1);
                }
            }
            if record.has_category() {
                let entry = table.categories.entry(record.category.clone()).or_insert(0);
                *entry = entry.saturating_add(1);
            }
        }

        table
    }

    /// Records containing `keyword`. Unknown keywords count zero.
    #[must_use]
    pub fn keyword_count(&self, keyword: &str) -> usize {
        self.keywords.get(keyword).copied().unwrap_or(0)
    }

    /// Records carrying the category value.
    #[must_use]
    pub fn category_count(&self, category: &str) -> usize {
        self.categories.get(category).copied().unwrap_or(0)
    }

    /// Distinct category values, sorted.
    pub fn categories(&self) -> impl Iterator<Item = (&str, usize)> {
        self.categories.iter().map(|(c, n)| (c.as_str(), *n))
    }

    /// Keyword counts, sorted by keyword.
    pub fn keywords(&self) -> impl Iterator<Item = (&str, usize)> {
        self.keywords.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// Whether nothing at all was observed.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.categories.is_empty() && self.keywords.values().all(|n| *n == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<TextRecord> {
        vec![
            TextRecord::new("Solar growth is strong", "Australia"),
            TextRecord::new("wind and SOLAR together", "UK"),
            TextRecord::new("Nothing relevant here", "UK"),
            TextRecord::missing_text("Chile"),
            TextRecord::new("windy days for wind farms", "UK"),
        ]
    }

    #[test]
    fn universe_keeps_records_matching_any_keyword() {
        let records = corpus();
        let universe = filter_universe(&records, &["solar", "wind"]);
        assert_eq!(universe.len(), 3);
    }

    #[test]
    fn universe_empty_for_empty_selection() {
        let records = corpus();
        let none: [&str; 0] = [];
        assert!(filter_universe(&records, &none).is_empty());
    }

    #[test]
    fn missing_text_never_qualifies() {
        let records = vec![TextRecord::missing_text("Chile")];
        assert!(filter_universe(&records, &["solar"]).is_empty());
    }

    #[test]
    fn keyword_counted_once_per_record() {
        let records = corpus();
        let universe = filter_universe(&records, &["wind"]);
        let table = FrequencyTable::count(&universe, ["wind"]);
        // "windy days for wind farms" contributes one, not two.
        assert_eq!(table.keyword_count("wind"), 2);
    }

    #[test]
    fn categories_counted_per_record() {
        let records = corpus();
        let universe = filter_universe(&records, &["solar", "wind"]);
        let table = FrequencyTable::count(&universe, ["solar", "wind"]);
        let categories: Vec<_> = table.categories().collect();
        assert_eq!(categories, vec![("Australia", 1), ("UK", 2)]);
        assert_eq!(table.category_count("Chile"), 0);
    }

    #[test]
    fn empty_universe_gives_zero_counts() {
        let table = FrequencyTable::count(&[], ["solar", "growth"]);
        assert!(table.is_all_zero());
        assert_eq!(table.keyword_count("solar"), 0);
        assert_eq!(table.keywords().count(), 2);
    }

    #[test]
    fn blank_categories_are_skipped() {
        let records = vec![TextRecord::new("solar", " ")];
        let universe = filter_universe(&records, &["solar"]);
        let table = FrequencyTable::count(&universe, ["solar"]);
        assert_eq!(table.categories().count(), 0);
        assert_eq!(table.keyword_count("solar"), 1);
    }
}

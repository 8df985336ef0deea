//! # Keyword Matcher
//!
//! Case-insensitive substring containment. No tokenization, no stemming:
//! `"wind"` matches `"windfall"`. Switching to token matching would change
//! which records qualify, so it is not done here.

/// A record text lowercased once, ready to be tested against many keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredText(Option<String>);

impl LoweredText {
    /// Lowercase `text`. Missing text never matches anything.
    #[must_use]
    pub fn new(text: Option<&str>) -> Self {
        Self(text.map(str::to_lowercase))
    }

    /// Whether `keyword` occurs in the text, ignoring case.
    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        let Some(text) = self.0.as_deref() else {
            return false;
        };
        if keyword.chars().any(char::is_uppercase) {
            text.contains(keyword.to_lowercase().as_str())
        } else {
            text.contains(keyword)
        }
    }

    /// Whether any of the keywords occurs in the text.
    pub fn contains_any<'a, I>(&self, keywords: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        keywords.into_iter().any(|k| self.contains(k))
    }

    /// The keywords that occur in the text, in input order.
    pub fn matches<'a, I>(&self, keywords: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keywords.into_iter().filter(|k| self.contains(k)).collect()
    }
}

/// Whether `keyword` occurs in `text`, ignoring case.
#[must_use]
pub fn contains_keyword(text: Option<&str>, keyword: &str) -> bool {
    LoweredText::new(text).contains(keyword)
}

/// The subset of `keywords` occurring in `text`, in keyword order.
///
/// Matched keywords come back as given, not lowercased.
pub fn match_keywords<'a, I>(text: Option<&str>, keywords: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    LoweredText::new(text).matches(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        assert!(contains_keyword(Some("SOLAR panels"), "solar"));
        assert!(contains_keyword(Some("solar panels"), "Solar"));
    }

    #[test]
    fn mixed_case_keywords_match() {
        assert_eq!(match_keywords(Some("solar panels"), ["Solar"]), vec!["Solar"]);
        assert_eq!(
            match_keywords(Some("WIND and Hydro"), ["wInD", "HYDRO", "solar"]),
            vec!["wInD", "HYDRO"]
        );
        assert!(LoweredText::new(Some("clean growth")).contains_any(["GROWTH"]));
    }

    #[test]
    fn matches_substrings() {
        assert!(contains_keyword(Some("a windfall tax"), "wind"));
        assert!(contains_keyword(Some("cleaner air"), "clean"));
    }

    #[test]
    fn missing_text_matches_nothing() {
        assert!(!contains_keyword(None, "solar"));
        assert!(match_keywords(None, ["solar", "wind"]).is_empty());
    }

    #[test]
    fn empty_text_matches_nothing() {
        assert!(match_keywords(Some(""), ["solar", "wind"]).is_empty());
    }

    #[test]
    fn match_keeps_keyword_order() {
        let found = match_keywords(
            Some("Wind beats solar, says hydropower lobby"),
            ["solar", "wind", "hydropower", "nuclear"],
        );
        assert_eq!(found, vec!["solar", "wind", "hydropower"]);
    }

    #[test]
    fn contains_any_short_circuits_on_first_hit() {
        let text = LoweredText::new(Some("Hydropower dams"));
        assert!(text.contains_any(["solar", "hydropower"]));
        assert!(!text.contains_any(["solar", "wind"]));
        assert!(!text.contains_any(std::iter::empty()));
    }
}

//! Pattern Classifier - maps a question to an answering intent
//!
//! Classification is keyword based. Checks run in a fixed priority order
//! and the first match wins:
//! Overview -> Summary -> Count -> WhoQuery -> Default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords that mark a question about the document's topic
pub const OVERVIEW_KEYWORDS: &[&str] = &["what", "topic", "about", "subject", "main", "discuss"];

/// Keywords that ask for a summary
pub const SUMMARY_KEYWORDS: &[&str] = &["summarize", "summary", "overview", "gist"];

/// Phrases that ask for quantities
pub const COUNT_KEYWORDS: &[&str] = &["how many", "count", "number of"];

/// Prefix for questions about people or entities
pub const WHO_PREFIX: &str = "who";

/// Question intent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// What the document is about
    Overview,
    /// Condensed restatement of the document
    Summary,
    /// Numbers mentioned in the document
    Count,
    /// People or named entities mentioned in the document
    WhoQuery,
    /// Keyword relevance ranking
    Default,
}

impl Intent {
    /// Stable label used in logs, metrics and API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Overview => "overview",
            Intent::Summary => "summary",
            Intent::Count => "count",
            Intent::WhoQuery => "who_query",
            Intent::Default => "default",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a question. Case-insensitive; substrings count as matches.
pub fn classify(question: &str) -> Intent {
    let question_lower = question.to_lowercase();

    if contains_any(&question_lower, OVERVIEW_KEYWORDS) {
        return Intent::Overview;
    }

    if contains_any(&question_lower, SUMMARY_KEYWORDS) {
        return Intent::Summary;
    }

    if contains_any(&question_lower, COUNT_KEYWORDS) {
        return Intent::Count;
    }

    if question_lower.starts_with(WHO_PREFIX) {
        return Intent::WhoQuery;
    }

    Intent::Default
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_intent() {
        assert_eq!(classify("What is this document?"), Intent::Overview);
        assert_eq!(classify("Which TOPIC is covered"), Intent::Overview);
        assert_eq!(classify("Does it discuss pricing"), Intent::Overview);
    }

    #[test]
    fn test_overview_wins_over_summary() {
        assert_eq!(classify("What is the summary?"), Intent::Overview);
        // "overview" contains no overview keyword, so summary applies
        assert_eq!(classify("Give me an overview"), Intent::Summary);
    }

    #[test]
    fn test_summary_intent() {
        assert_eq!(classify("Please summarize"), Intent::Summary);
        assert_eq!(classify("Give me the gist"), Intent::Summary);
    }

    #[test]
    fn test_count_intent() {
        assert_eq!(classify("How many percent?"), Intent::Count);
        assert_eq!(classify("Count the units"), Intent::Count);
        assert_eq!(classify("The number of employees"), Intent::Count);
    }

    #[test]
    fn test_who_intent_requires_prefix() {
        assert_eq!(classify("Who wrote this?"), Intent::WhoQuery);
        assert_eq!(classify("  who wrote this?"), Intent::Default);
        assert_eq!(classify("Tell me who wrote it"), Intent::Default);
    }

    #[test]
    fn test_substring_matching() {
        // "whatever" contains "what"
        assert_eq!(classify("Whatever"), Intent::Overview);
        // "account" contains "count"
        assert_eq!(classify("Describe the account"), Intent::Count);
    }

    #[test]
    fn test_default_intent() {
        assert_eq!(classify("Describe the revenue"), Intent::Default);
        assert_eq!(classify(""), Intent::Default);
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::WhoQuery).unwrap();
        assert_eq!(json, "\"who_query\"");
        assert_eq!(Intent::WhoQuery.to_string(), "who_query");
    }
}

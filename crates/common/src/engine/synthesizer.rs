//! Answer Synthesizer - builds an answer from a document's text
//!
//! Provides:
//! - Intent-specific extraction (overview, summary, numbers, entities)
//! - Keyword-overlap sentence ranking
//! - A fallback chain (paragraph -> document prefix -> fixed message)
//!
//! Synthesis never fails and always returns a non-empty string.

use super::classifier::Intent;
use super::normalizer::{char_len, char_prefix, split_paragraphs, split_sentences};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

pub const OVERVIEW_MARKER: &str = "This document discusses: ";
pub const SUMMARY_MARKER: &str = "📝 Summary: ";
pub const NUMBERS_MARKER: &str = "📊 The document mentions these numbers: ";
pub const ENTITIES_MARKER: &str = "👤 People/entities mentioned: ";
pub const RANKED_MARKER: &str = "📄 Based on the document: ";
pub const PARAGRAPH_MARKER: &str = "ℹ️ Here's what I found in the document:\n\n";
pub const PREFIX_MARKER: &str = "📖 Document overview: ";
pub const NOT_FOUND_MESSAGE: &str = "❓ I couldn't find specific information to answer that question. Could you try rephrasing or ask about something specific mentioned in the document?";

/// Minimum sentence length (exclusive) for overview answers
const OVERVIEW_MIN_SENTENCE: usize = 20;
const OVERVIEW_SENTENCES: usize = 3;

/// Minimum sentence length (exclusive) for summaries
const SUMMARY_MIN_SENTENCE: usize = 30;
const SUMMARY_SENTENCES: usize = 5;

const MAX_NUMBERS: usize = 10;
const MAX_ENTITIES: usize = 10;

/// Question tokens must be longer than this to count as significant
const SIGNIFICANT_WORD_MIN: usize = 3;
const RANKED_SENTENCES: usize = 3;

/// Minimum paragraph length (exclusive) for the paragraph fallback
const FALLBACK_MIN_PARAGRAPH: usize = 50;
/// Context must be longer than this for the prefix fallback
const PREFIX_FALLBACK_MIN_CONTEXT: usize = 100;
const PREFIX_FALLBACK_CHARS: usize = 500;

/// Integers, decimals and percentages. `\d` is ASCII-only in regex-lite.
const NUMBER_PATTERN: &str = r"\d+(?:\.\d+)?%?";

/// Runs of capitalized ASCII words (`Alice`, `New York City`) separated by
/// single whitespace characters.
const ENTITY_PATTERN: &str = r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)*\b";

/// Which strategy produced an answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Overview,
    Summary,
    Numbers,
    Entities,
    RankedSentences,
    Paragraph,
    DocumentPrefix,
    NotFound,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Overview => "overview",
            AnswerSource::Summary => "summary",
            AnswerSource::Numbers => "numbers",
            AnswerSource::Entities => "entities",
            AnswerSource::RankedSentences => "ranked_sentences",
            AnswerSource::Paragraph => "paragraph",
            AnswerSource::DocumentPrefix => "document_prefix",
            AnswerSource::NotFound => "not_found",
        }
    }
}

/// Synthesized answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text shown to the user
    pub text: String,

    /// Strategy that produced the text
    pub source: AnswerSource,
}

impl Answer {
    fn new(text: String, source: AnswerSource) -> Self {
        Self { text, source }
    }
}

/// A sentence with its keyword overlap against a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence {
    pub sentence: String,
    pub overlap: usize,
}

/// Produce the answer text for a classified question
pub fn synthesize(intent: Intent, question: &str, context: &str) -> String {
    compose(intent, question, context).text
}

/// Produce the answer along with the strategy that produced it.
///
/// Overview, Count and WhoQuery fall through to relevance ranking when
/// they extract nothing. Summary never falls through.
pub fn compose(intent: Intent, question: &str, context: &str) -> Answer {
    let extracted = match intent {
        Intent::Overview => overview(context),
        Intent::Summary => Some(summary(context)),
        Intent::Count => numbers(context),
        Intent::WhoQuery => entities(context),
        Intent::Default => None,
    };

    extracted.unwrap_or_else(|| relevance_answer(question, context))
}

fn overview(context: &str) -> Option<Answer> {
    let sentences = split_sentences(context, OVERVIEW_MIN_SENTENCE);
    if sentences.is_empty() {
        return None;
    }

    let body = sentences
        .iter()
        .take(OVERVIEW_SENTENCES)
        .map(|s| format!("{}.", s))
        .collect::<Vec<_>>()
        .join(" ");

    Some(Answer::new(
        format!("{}{}", OVERVIEW_MARKER, body),
        AnswerSource::Overview,
    ))
}

fn summary(context: &str) -> Answer {
    let sentences = split_sentences(context, SUMMARY_MIN_SENTENCE);
    let selected: Vec<&str> = sentences
        .iter()
        .take(SUMMARY_SENTENCES)
        .map(String::as_str)
        .collect();

    Answer::new(
        format!("{}{}.", SUMMARY_MARKER, selected.join(". ")),
        AnswerSource::Summary,
    )
}

fn numbers(context: &str) -> Option<Answer> {
    let found = extract_numbers(context);
    if found.is_empty() {
        return None;
    }

    Some(Answer::new(
        format!("{}{}", NUMBERS_MARKER, found.join(", ")),
        AnswerSource::Numbers,
    ))
}

fn entities(context: &str) -> Option<Answer> {
    let found = extract_entities(context);
    if found.is_empty() {
        return None;
    }

    Some(Answer::new(
        format!("{}{}", ENTITIES_MARKER, found.join(", ")),
        AnswerSource::Entities,
    ))
}

/// Numeric tokens in order of appearance, at most ten
pub fn extract_numbers(context: &str) -> Vec<&str> {
    number_regex()
        .find_iter(context)
        .take(MAX_NUMBERS)
        .map(|m| m.as_str())
        .collect()
}

/// Distinct capitalized-word runs in order of first appearance, at most ten
pub fn extract_entities(context: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    entity_regex()
        .find_iter(context)
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .take(MAX_ENTITIES)
        .collect()
}

/// Lowercased question tokens longer than three characters.
///
/// Tokens are whitespace-delimited, so trailing punctuation stays attached
/// (`cats?` does not match `cats`).
pub fn significant_words(question: &str) -> HashSet<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .filter(|word| char_len(word) > SIGNIFICANT_WORD_MIN)
        .map(str::to_string)
        .collect()
}

/// Score every non-empty sentence of `context` against `question`, in document order
pub fn score_sentences(question: &str, context: &str) -> Vec<ScoredSentence> {
    let question_words = significant_words(question);

    split_sentences(context, 0)
        .into_iter()
        .map(|sentence| {
            let lowered = sentence.to_lowercase();
            let sentence_words: HashSet<&str> = lowered.split_whitespace().collect();
            let overlap = question_words
                .iter()
                .filter(|word| sentence_words.contains(word.as_str()))
                .count();
            ScoredSentence { sentence, overlap }
        })
        .collect()
}

/// Sentences sharing at least one significant word with the question,
/// best first. Equal overlaps keep document order.
pub fn rank_sentences(question: &str, context: &str) -> Vec<ScoredSentence> {
    let mut candidates: Vec<ScoredSentence> = score_sentences(question, context)
        .into_iter()
        .filter(|scored| scored.overlap > 0)
        .collect();

    // sort_by is stable
    candidates.sort_by(|a, b| b.overlap.cmp(&a.overlap));
    candidates
}

fn relevance_answer(question: &str, context: &str) -> Answer {
    let ranked = rank_sentences(question, context);
    if ranked.is_empty() {
        return fallback(context);
    }

    let top = ranked
        .iter()
        .take(RANKED_SENTENCES)
        .map(|scored| scored.sentence.as_str())
        .collect::<Vec<_>>()
        .join(". ");

    Answer::new(
        format!("{}{}.", RANKED_MARKER, top),
        AnswerSource::RankedSentences,
    )
}

fn fallback(context: &str) -> Answer {
    if let Some(paragraph) = split_paragraphs(context, FALLBACK_MIN_PARAGRAPH)
        .into_iter()
        .next()
    {
        return Answer::new(
            format!("{}{}", PARAGRAPH_MARKER, paragraph),
            AnswerSource::Paragraph,
        );
    }

    if char_len(context) > PREFIX_FALLBACK_MIN_CONTEXT {
        return Answer::new(
            format!(
                "{}{}...",
                PREFIX_MARKER,
                char_prefix(context, PREFIX_FALLBACK_CHARS)
            ),
            AnswerSource::DocumentPrefix,
        );
    }

    Answer::new(NOT_FOUND_MESSAGE.to_string(), AnswerSource::NotFound)
}

fn number_regex() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"))
}

fn entity_regex() -> &'static Regex {
    static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
    ENTITY_RE.get_or_init(|| Regex::new(ENTITY_PATTERN).expect("entity pattern is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classify;

    const PETS: &str = "The cat sat. The dog ran fast. Cats and dogs are pets.";

    #[test]
    fn test_overview_takes_first_three_long_sentences() {
        let context = "Rust is a systems programming language. \
                       It guarantees memory safety without a garbage collector. \
                       Short one. \
                       Cargo is the build tool and package manager. \
                       Fourth long sentence is dropped here.";

        let answer = compose(Intent::Overview, "What is this?", context);

        assert_eq!(answer.source, AnswerSource::Overview);
        assert_eq!(
            answer.text,
            "This document discusses: Rust is a systems programming language. \
             It guarantees memory safety without a garbage collector. \
             Cargo is the build tool and package manager."
        );
    }

    #[test]
    fn test_overview_without_long_sentences_falls_through_to_ranking() {
        let answer = compose(Intent::Overview, "What about bits", "Tiny. Bits. Here.");

        assert_eq!(answer.source, AnswerSource::RankedSentences);
        assert_eq!(answer.text, "📄 Based on the document: Bits.");
    }

    #[test]
    fn test_summary_keeps_at_most_five_long_fragments() {
        let sentence = "This sentence is comfortably longer than thirty characters";
        let context = (1..=7)
            .map(|i| format!("{} number {}", sentence, i))
            .collect::<Vec<_>>()
            .join(". ");

        let question = "Please summarize";
        assert_eq!(classify(question), Intent::Summary);

        let text = synthesize(classify(question), question, &context);
        assert!(text.starts_with(SUMMARY_MARKER));

        let body = text
            .strip_prefix(SUMMARY_MARKER)
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap();
        let fragments: Vec<&str> = body.split(". ").collect();
        assert_eq!(fragments.len(), 5);
        assert!(fragments.iter().all(|f| f.chars().count() > 30));
        assert!(fragments[4].ends_with("number 5"));
    }

    #[test]
    fn test_summary_skips_short_fragments() {
        let context = "Tiny. This is a much longer sentence about the report. Also tiny.";
        let text = synthesize(Intent::Summary, "summary", context);
        assert_eq!(
            text,
            "📝 Summary: This is a much longer sentence about the report."
        );
    }

    #[test]
    fn test_summary_with_no_long_sentences_keeps_marker() {
        let text = synthesize(Intent::Summary, "summary", "Too short. Also short.");
        assert_eq!(text, "📝 Summary: .");
    }

    #[test]
    fn test_count_extracts_numbers_and_percentages() {
        let question = "How many percent?";
        let context = "Sales grew 20% and 15 units.";

        assert_eq!(classify(question), Intent::Count);
        assert_eq!(
            synthesize(classify(question), question, context),
            "📊 The document mentions these numbers: 20%, 15"
        );
    }

    #[test]
    fn test_count_keeps_decimals_and_caps_at_ten() {
        assert_eq!(extract_numbers("Pi is 3.14 and e is 2.71."), vec!["3.14", "2.71"]);

        let context = (1..=12).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let found = extract_numbers(&context);
        assert_eq!(found.len(), 10);
        assert_eq!(found[9], "10");
    }

    #[test]
    fn test_count_without_digits_never_uses_numbers_marker() {
        let context = "There are several apples in the basket. Nobody counted them.";
        let answer = compose(Intent::Count, "How many apples are there", context);

        assert_ne!(answer.source, AnswerSource::Numbers);
        assert!(!answer.text.starts_with(NUMBERS_MARKER));
        assert_eq!(
            answer.text,
            "📄 Based on the document: There are several apples in the basket."
        );
    }

    #[test]
    fn test_who_dedupes_in_order_of_appearance() {
        let context = "The report was written by Alice Smith and reviewed by Bob Jones. \
                       Alice Smith approved it.";

        let answer = compose(Intent::WhoQuery, "Who wrote it?", context);

        assert_eq!(answer.source, AnswerSource::Entities);
        assert_eq!(
            answer.text,
            "👤 People/entities mentioned: The, Alice Smith, Bob Jones"
        );
    }

    #[test]
    fn test_who_caps_at_ten_after_dedup() {
        let context = "Alice met Bob, then Alice met Carol and Bob met Dave, Erin, Frank, \
                       Grace, Heidi, Ivan, Judy, Mallory and Oscar.";

        let found = extract_entities(context);

        assert_eq!(
            found,
            vec![
                "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan",
                "Judy",
            ]
        );
        let distinct: HashSet<&str> = found.iter().copied().collect();
        assert_eq!(distinct.len(), found.len());

        let answer = compose(Intent::WhoQuery, "Who met whom?", context);
        assert_eq!(answer.source, AnswerSource::Entities);
        assert!(answer.text.ends_with("Ivan, Judy"));
    }

    #[test]
    fn test_who_ignores_non_ascii_capitals() {
        assert!(extract_entities("émile zola wrote in ÉPOQUE").is_empty());
    }

    #[test]
    fn test_who_without_names_falls_through() {
        let answer = compose(Intent::WhoQuery, "who knows", "nothing capitalized here.");
        assert_eq!(answer.source, AnswerSource::NotFound);
    }

    #[test]
    fn test_literal_overlap_without_stemming() {
        let question = "Tell me about cats";

        let words = significant_words(question);
        let expected: HashSet<String> =
            ["tell", "about", "cats"].iter().map(|w| w.to_string()).collect();
        assert_eq!(words, expected);

        let scored = score_sentences(question, PETS);
        let overlaps: Vec<(&str, usize)> = scored
            .iter()
            .map(|s| (s.sentence.as_str(), s.overlap))
            .collect();
        assert_eq!(
            overlaps,
            vec![
                ("The cat sat", 0),
                ("The dog ran fast", 0),
                ("Cats and dogs are pets", 1),
            ]
        );

        assert_eq!(
            synthesize(Intent::Default, question, PETS),
            "📄 Based on the document: Cats and dogs are pets."
        );
    }

    #[test]
    fn test_question_with_about_is_overview() {
        assert_eq!(classify("Tell me about cats"), Intent::Overview);
        assert_eq!(
            synthesize(classify("Tell me about cats"), "Tell me about cats", PETS),
            "This document discusses: Cats and dogs are pets."
        );
    }

    #[test]
    fn test_ranking_is_stable_and_capped() {
        let context = "alpha beta. gamma. alpha beta gamma delta. beta alone";
        let question = "alpha beta gamma delta";

        let ranked = rank_sentences(question, context);
        let order: Vec<(&str, usize)> = ranked
            .iter()
            .map(|s| (s.sentence.as_str(), s.overlap))
            .collect();
        assert_eq!(
            order,
            vec![
                ("alpha beta gamma delta", 4),
                ("alpha beta", 2),
                ("gamma", 1),
                ("beta alone", 1),
            ]
        );

        assert_eq!(
            synthesize(Intent::Default, question, context),
            "📄 Based on the document: alpha beta gamma delta. alpha beta. gamma."
        );
    }

    #[test]
    fn test_paragraph_fallback() {
        let paragraph = "This opening paragraph is comfortably longer than fifty characters";
        let context = format!("{}\n\nTail.", paragraph);

        let answer = compose(Intent::Default, "zebra stripes", &context);

        assert_eq!(answer.source, AnswerSource::Paragraph);
        assert_eq!(answer.text, format!("{}{}", PARAGRAPH_MARKER, paragraph));
    }

    #[test]
    fn test_paragraph_fallback_wins_over_prefix() {
        let paragraph = "The second paragraph is the first one longer than fifty characters";
        let context = format!(
            "Short intro\n\n{}\n\nClosing words that pad the document past one hundred characters",
            paragraph
        );
        assert!(context.chars().count() > 100);

        let answer = compose(Intent::Default, "zebra stripes", &context);

        assert_eq!(answer.source, AnswerSource::Paragraph);
        assert_eq!(answer.text, format!("{}{}", PARAGRAPH_MARKER, paragraph));
    }

    #[test]
    fn test_prefix_fallback_truncates_to_500_chars() {
        let context = "ab\n\n".repeat(200);
        let answer = compose(Intent::Default, "zebra", &context);

        assert_eq!(answer.source, AnswerSource::DocumentPrefix);
        let body = answer
            .text
            .strip_prefix(PREFIX_MARKER)
            .and_then(|rest| rest.strip_suffix("..."))
            .unwrap();
        assert_eq!(body.chars().count(), 500);
        assert_eq!(body, &context[..500]);
    }

    #[test]
    fn test_not_found_message() {
        let answer = compose(Intent::Default, "Describe it", "Short text.");
        assert_eq!(answer.source, AnswerSource::NotFound);
        assert_eq!(answer.text, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_synthesis_is_deterministic_and_never_empty() {
        let contexts = [PETS, "Short text.", "Sales grew 20% and 15 units.", ""];
        let intents = [
            Intent::Overview,
            Intent::Summary,
            Intent::Count,
            Intent::WhoQuery,
            Intent::Default,
        ];

        for context in contexts {
            for intent in intents {
                let first = synthesize(intent, "Tell me about cats", context);
                let second = synthesize(intent, "Tell me about cats", context);
                assert!(!first.is_empty());
                assert_eq!(first, second);
            }
        }
    }
}

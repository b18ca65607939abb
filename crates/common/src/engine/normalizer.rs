//! Text Normalizer - naive sentence and paragraph splitting
//!
//! Splitting is delimiter based on purpose: a literal `.` ends a sentence
//! and a literal blank line (`\n\n`) ends a paragraph. Abbreviations and
//! decimal numbers are split like any other period.

/// Sentence delimiter
pub const SENTENCE_DELIMITER: char = '.';

/// Paragraph delimiter
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Split `text` on `.` and keep trimmed fragments longer than `min_len` characters.
///
/// A `min_len` of 0 keeps every non-empty fragment.
pub fn split_sentences(text: &str, min_len: usize) -> Vec<String> {
    text.split(SENTENCE_DELIMITER)
        .map(str::trim)
        .filter(|fragment| char_len(fragment) > min_len)
        .map(str::to_string)
        .collect()
}

/// Split `text` on blank lines and keep trimmed paragraphs longer than `min_len` characters.
pub fn split_paragraphs(text: &str, min_len: usize) -> Vec<String> {
    text.split(PARAGRAPH_DELIMITER)
        .map(str::trim)
        .filter(|paragraph| char_len(paragraph) > min_len)
        .map(str::to_string)
        .collect()
}

/// Length in Unicode scalar values, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First `count` characters of `text`
pub fn char_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_trims_and_drops_empty() {
        let sentences = split_sentences("  First one.  Second one. . Third", 0);
        assert_eq!(sentences, vec!["First one", "Second one", "Third"]);
    }

    #[test]
    fn test_split_sentences_min_len_is_exclusive() {
        // exactly 20 characters
        let twenty = "abcdefghij abcdefghi";
        assert_eq!(twenty.len(), 20);

        let text = format!("{}. {}x.", twenty, twenty);
        let sentences = split_sentences(&text, 20);
        assert_eq!(sentences, vec![format!("{}x", twenty)]);
    }

    #[test]
    fn test_split_sentences_is_naive_about_decimals() {
        let sentences = split_sentences("Pi is 3.14 roughly", 0);
        assert_eq!(sentences, vec!["Pi is 3", "14 roughly"]);
    }

    #[test]
    fn test_split_paragraphs() {
        let long = "x".repeat(51);
        let text = format!("short\n\n  {}  \n\n{}", long, "y".repeat(50));
        let paragraphs = split_paragraphs(&text, 50);
        assert_eq!(paragraphs, vec![long]);
    }

    #[test]
    fn test_single_newline_does_not_split_paragraphs() {
        let paragraphs = split_paragraphs("line one\nline two", 0);
        assert_eq!(paragraphs, vec!["line one\nline two"]);
    }

    #[test]
    fn test_char_len_counts_codepoints() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!("héllo".len(), 6);
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("héllo world", 3), "hél");
        assert_eq!(char_prefix("abc", 10), "abc");
        assert_eq!(char_prefix("abc", 0), "");
    }
}

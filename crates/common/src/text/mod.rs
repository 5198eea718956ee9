//! Sentence segmentation for evidence snippets
//!
//! Splits snippet text on sentence boundaries before parsing. Snippets
//! without any boundary are treated as a single sentence.

use regex_lite::Regex;
use std::sync::OnceLock;

fn boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    // Terminal punctuation followed by whitespace, or a hard line break
    BOUNDARY.get_or_init(|| Regex::new(r"[.!?]+\s+|\n+").expect("valid boundary pattern"))
}

/// Split free text into sentences
pub fn split_sentences(text: &str) -> Vec<String> {
    boundary()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whitespace token count, used to gate uninformative snippets before
/// they reach the parser
pub fn token_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminal_punctuation() {
        let sentences = split_sentences("The ship sank. 712 people survived! Where was it built?");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "The ship sank");
    }

    #[test]
    fn test_no_boundary_is_one_sentence() {
        let sentences = split_sentences("a snippet without any boundary at all");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_splits_on_newlines() {
        let sentences = split_sentences("first line\nsecond line");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_token_count() {
        assert_eq!(token_count("three little words"), 3);
    }
}

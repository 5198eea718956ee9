//! Parsed question with its focus token
//!
//! The focus token is the head of the interrogative word - the token the
//! question is structurally "about". Evidence tokens standing in the same
//! dependency relation are weighted higher during overlap scoring.

use crate::classifier::AnswerType;
use quaero_common::parse::{DepRel, ParsedSentence};
use std::collections::HashSet;

const INTERROGATIVES: &[&str] = &["who", "whom", "whose", "what", "when", "where", "why", "how", "which"];

/// One question, built once per `answer` call and immutable afterwards
#[derive(Debug, Clone)]
pub struct Question {
    raw: String,
    parsed: ParsedSentence,
    answer_type: AnswerType,
    focus: Option<usize>,
}

impl Question {
    pub fn new(raw: impl Into<String>, parsed: ParsedSentence, answer_type: AnswerType) -> Self {
        let focus = parsed
            .tokens()
            .iter()
            .position(|t| INTERROGATIVES.contains(&t.lemma.as_str()))
            .and_then(|wh| parsed.token(wh).head);

        Self {
            raw: raw.into(),
            parsed,
            answer_type,
            focus,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parsed(&self) -> &ParsedSentence {
        &self.parsed
    }

    pub fn answer_type(&self) -> AnswerType {
        self.answer_type
    }

    /// Dependency relation of the focus token, when the question has an
    /// interrogative word with a head
    pub fn focus_rel(&self) -> Option<DepRel> {
        self.focus.map(|idx| self.parsed.token(idx).rel)
    }

    /// Lexical lemmas of the question, for overlap scoring and for
    /// excluding the question's own words from extracted spans
    pub fn lemmas(&self) -> HashSet<&str> {
        self.parsed
            .tokens()
            .iter()
            .filter(|t| t.is_lexical())
            .map(|t| t.lemma.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quaero_common::parse::{HeuristicParser, SentenceParser};

    #[test]
    fn test_focus_is_head_of_interrogative() {
        let parsed = HeuristicParser::new()
            .parse("What year did the ship sink?")
            .unwrap();
        let question = Question::new("What year did the ship sink?", parsed, AnswerType::Date);

        // "what" depends on the root auxiliary
        assert_eq!(question.focus_rel(), Some(DepRel::Root));
    }

    #[test]
    fn test_lemmas_exclude_punctuation() {
        let parsed = HeuristicParser::new().parse("Who built it?").unwrap();
        let question = Question::new("Who built it?", parsed, AnswerType::Person);

        let lemmas = question.lemmas();
        assert!(lemmas.contains("who"));
        assert!(lemmas.contains("build"));
        assert!(!lemmas.contains("?"));
    }
}

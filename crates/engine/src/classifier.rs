//! Question classification
//!
//! Maps a parsed question to the answer type its extraction policy keys on.
//! The trained model is an injected black box behind `ClassifierModel`;
//! `LexicalClassifier` is the built-in deterministic model keyed on the
//! interrogative lemma.

use quaero_common::parse::{ParsedSentence, SentenceParser};
use quaero_common::{QaError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Expected answer type of a question. An opaque tag to the pipeline,
/// used only to select the extraction policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    Person,
    Date,
    Location,
    Quantity,
    Definition,
    Other,
}

/// Trait for answer-type prediction models.
///
/// "No confident label" is not a failure: models return
/// `AnswerType::Other` for it. `QaError::Classification` is reserved for
/// invocation errors.
pub trait ClassifierModel: Send + Sync {
    /// Predict the answer type of a parsed question
    fn predict(&self, question: &ParsedSentence) -> Result<AnswerType>;

    /// Whether the model loaded successfully
    fn ready(&self) -> bool {
        true
    }

    /// Model name for logging
    fn name(&self) -> &str;
}

/// Deterministic model keyed on the question's interrogative lemma and
/// leading bigrams
#[derive(Debug, Default)]
pub struct LexicalClassifier;

impl LexicalClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl ClassifierModel for LexicalClassifier {
    fn predict(&self, question: &ParsedSentence) -> Result<AnswerType> {
        let lemmas: Vec<&str> = question.tokens().iter().map(|t| t.lemma.as_str()).collect();

        let first = lemmas.first().copied().unwrap_or_default();
        let second = lemmas.get(1).copied().unwrap_or_default();

        let label = match first {
            "who" | "whom" | "whose" => AnswerType::Person,
            "when" => AnswerType::Date,
            "where" => AnswerType::Location,
            "how" if matches!(second, "many" | "much") => AnswerType::Quantity,
            "what" | "which" => match second {
                "year" | "date" | "day" | "month" | "century" => AnswerType::Date,
                "be" => AnswerType::Definition,
                _ => AnswerType::Other,
            },
            _ if lemmas.contains(&"define") => AnswerType::Definition,
            _ => AnswerType::Other,
        };

        Ok(label)
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

/// Wraps the parser and a prediction model into the single
/// `classify(question) -> (parse, answer type)` operation
pub struct QuestionClassifier {
    parser: Arc<dyn SentenceParser>,
    model: Arc<dyn ClassifierModel>,
}

impl QuestionClassifier {
    pub fn new(parser: Arc<dyn SentenceParser>, model: Arc<dyn ClassifierModel>) -> Self {
        Self { parser, model }
    }

    /// Whether both the parser and the model report ready
    pub fn ready(&self) -> bool {
        self.parser.ready() && self.model.ready()
    }

    /// Parse and classify a question string.
    ///
    /// Fails with `QaError::Parsing` on blank or unparseable input and
    /// `QaError::Classification` on model invocation errors.
    pub fn classify(&self, question: &str) -> Result<(ParsedSentence, AnswerType)> {
        if question.trim().is_empty() {
            return Err(QaError::parsing("empty question"));
        }

        let parsed = self.parser.parse(question)?;
        let label = self.model.predict(&parsed)?;

        tracing::debug!(
            model = self.model.name(),
            answer_type = ?label,
            "Question classified"
        );

        Ok((parsed, label))
    }
}

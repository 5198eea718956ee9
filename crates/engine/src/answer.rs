//! Structural answer extraction
//!
//! For every evidence sentence that shares enough dependency structure with
//! the question, locate the span playing the syntactic role the predicted
//! answer type expects, render it back to surface text, and merge the
//! candidates into one deduplicated answer set.

use crate::classifier::AnswerType;
use crate::question::Question;
use metrics::counter;
use quaero_common::config::AnswerConfig;
use quaero_common::parse::{DepRel, ParsedSentence, PosTag, SentenceParser};
use quaero_common::text::{split_sentences, token_count};
use quaero_common::Result;
use quaero_retrieval::EvidenceUnit;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One extracted span, kept only for intra-call deduplication
#[derive(Debug, Clone)]
struct AnswerCandidate {
    text: String,
    source: String,
    score: f32,
}

/// The structural-matching core
pub struct AnswerEngine {
    parser: Arc<dyn SentenceParser>,
    config: AnswerConfig,
}

impl AnswerEngine {
    pub fn new(parser: Arc<dyn SentenceParser>, config: AnswerConfig) -> Self {
        Self { parser, config }
    }

    /// Extract a deduplicated set of answer strings from the evidence.
    ///
    /// Evidence units are independent: each is processed on its own and
    /// owns its local candidate list; lists are merged at a single join
    /// point. An unparseable evidence sentence is skipped, never fatal.
    /// Zero surviving candidates is a success yielding an empty set.
    pub async fn extract(
        &self,
        question: &Question,
        evidence: &[EvidenceUnit],
    ) -> Result<HashSet<String>> {
        let per_unit = futures::future::join_all(
            evidence.iter().map(|unit| self.process_unit(question, unit)),
        )
        .await;

        // Case-insensitive dedup keeping the first-seen spelling: the
        // score never ranks or replaces, so added evidence can only add
        // answers, never displace one already in the set
        let mut unique: HashMap<String, AnswerCandidate> = HashMap::new();
        for candidates in per_unit {
            for candidate in candidates {
                tracing::trace!(
                    answer = candidate.text.as_str(),
                    source = candidate.source.as_str(),
                    score = candidate.score,
                    "Answer candidate"
                );
                unique.entry(candidate.text.to_lowercase()).or_insert(candidate);
            }
        }

        Ok(unique.into_values().map(|c| c.text).collect())
    }

    /// Mine one evidence unit for candidates
    async fn process_unit(&self, question: &Question, unit: &EvidenceUnit) -> Vec<AnswerCandidate> {
        let mut candidates = Vec::new();

        for sentence in split_sentences(&unit.text) {
            if token_count(&sentence) < self.config.min_sentence_tokens {
                counter!("quaero_evidence_sentences_skipped_total", "reason" => "too_short")
                    .increment(1);
                continue;
            }

            let parsed = match self.parser.parse(&sentence) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!(
                        source = unit.source.as_str(),
                        error = %e,
                        "Skipping unparseable evidence sentence"
                    );
                    counter!("quaero_evidence_sentences_skipped_total", "reason" => "unparseable")
                        .increment(1);
                    continue;
                }
            };

            let score = self.overlap_score(question, &parsed);
            if score < self.config.min_overlap {
                continue;
            }

            if let Some(span) = self.locate_span(question, &parsed) {
                let text = normalize(&parsed.render(&span));
                if !text.is_empty() {
                    candidates.push(AnswerCandidate {
                        text,
                        source: unit.source.clone(),
                        score,
                    });
                }
            }
        }

        tracing::debug!(
            source = unit.source.as_str(),
            candidates = candidates.len(),
            "Evidence unit processed"
        );

        candidates
    }

    /// Structural overlap between question and evidence sentence: one point
    /// per shared lemma, an extra point when the shared token heads a
    /// subtree, another when it stands in the question focus relation
    fn overlap_score(&self, question: &Question, sentence: &ParsedSentence) -> f32 {
        let question_lemmas = question.lemmas();
        let focus_rel = question.focus_rel();

        let mut score = 0.0;
        for (idx, token) in sentence.tokens().iter().enumerate() {
            if !token.is_lexical() || !question_lemmas.contains(token.lemma.as_str()) {
                continue;
            }
            score += 1.0;
            if !sentence.children(idx).is_empty() {
                score += 1.0;
            }
            if focus_rel == Some(token.rel) {
                score += 1.0;
            }
        }
        score
    }

    /// Answer-span location policy per answer type
    fn locate_span(&self, question: &Question, sentence: &ParsedSentence) -> Option<Vec<usize>> {
        let shared = question.lemmas();
        let is_shared = |idx: usize| shared.contains(sentence.token(idx).lemma.as_str());

        match question.answer_type() {
            AnswerType::Date | AnswerType::Quantity => sentence
                .tokens()
                .iter()
                .enumerate()
                .find(|(idx, t)| t.pos == PosTag::Numeral && !is_shared(*idx))
                .map(|(idx, _)| sentence.subtree(idx)),

            AnswerType::Person | AnswerType::Location => sentence
                .tokens()
                .iter()
                .enumerate()
                .find(|(idx, t)| {
                    t.pos == PosTag::ProperNoun
                        && !is_shared(*idx)
                        // Skip run tails so a multi-word name is one span
                        && t.head.map_or(true, |h| sentence.token(h).pos != PosTag::ProperNoun)
                })
                .map(|(idx, _)| sentence.subtree(idx)),

            AnswerType::Definition => sentence
                .children(sentence.root())
                .into_iter()
                .find(|&child| {
                    matches!(sentence.token(child).rel, DepRel::Complement | DepRel::Object)
                })
                .map(|child| sentence.subtree(child))
                .or_else(|| self.sentence_minus_shared(sentence, &shared)),

            AnswerType::Other => sentence
                .children(sentence.root())
                .into_iter()
                .find(|&child| sentence.token(child).rel == DepRel::Subject)
                .map(|child| sentence.subtree(child))
                .or_else(|| self.sentence_minus_shared(sentence, &shared)),
        }
    }

    /// Fallback span: the sentence trimmed of the question's own tokens
    fn sentence_minus_shared(
        &self,
        sentence: &ParsedSentence,
        shared: &HashSet<&str>,
    ) -> Option<Vec<usize>> {
        let remainder: Vec<usize> = sentence
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_lexical() && !shared.contains(t.lemma.as_str()))
            .map(|(idx, _)| idx)
            .collect();

        if remainder.is_empty() {
            None
        } else {
            Some(remainder)
        }
    }
}

/// Post-render trim: outer whitespace and punctuation
fn normalize(rendered: &str) -> String {
    rendered
        .trim_matches(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '\''))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{AnswerType, ClassifierModel, LexicalClassifier};
    use quaero_common::parse::HeuristicParser;

    fn engine() -> AnswerEngine {
        AnswerEngine::new(
            Arc::new(HeuristicParser::new()),
            AnswerConfig {
                min_overlap: 2.0,
                min_sentence_tokens: 3,
            },
        )
    }

    fn question(text: &str) -> Question {
        let parser = HeuristicParser::new();
        let parsed = parser.parse(text).unwrap();
        let label = LexicalClassifier::new().predict(&parsed).unwrap();
        Question::new(text, parsed, label)
    }

    fn unit(text: &str, source: &str) -> EvidenceUnit {
        EvidenceUnit {
            text: text.to_string(),
            source: source.to_string(),
        }
    }

    #[tokio::test]
    async fn test_date_extraction() {
        let q = question("What year did the ship Titanic sink?");
        assert_eq!(q.answer_type(), AnswerType::Date);

        let evidence = vec![unit(
            "The Titanic sank in 1912 after striking an iceberg.",
            "https://example.org/titanic",
        )];
        let answers = engine().extract(&q, &evidence).await.unwrap();
        assert!(answers.contains("1912"), "answers: {:?}", answers);
    }

    #[tokio::test]
    async fn test_unrelated_evidence_contributes_nothing() {
        let q = question("What year did the ship Titanic sink?");

        let evidence = vec![unit(
            "Bananas ripen faster inside a paper bag.",
            "https://example.org/bananas",
        )];
        let answers = engine().extract(&q, &evidence).await.unwrap();
        assert!(answers.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_phrase_across_units_collapses() {
        let q = question("What year did the ship Titanic sink?");

        let evidence = vec![
            unit("The Titanic sank in 1912.", "https://a.example.org"),
            unit("Records agree the Titanic sank in 1912.", "https://b.example.org"),
        ];
        let answers = engine().extract(&q, &evidence).await.unwrap();
        assert_eq!(
            answers.iter().filter(|a| a.contains("1912")).count(),
            1,
            "answers: {:?}",
            answers
        );
    }

    #[tokio::test]
    async fn test_short_snippet_skipped() {
        let q = question("What year did the ship Titanic sink?");

        let evidence = vec![unit("Titanic 1912", "https://example.org")];
        let answers = engine().extract(&q, &evidence).await.unwrap();
        assert!(answers.is_empty());
    }

    #[tokio::test]
    async fn test_person_extraction_skips_question_tokens() {
        let q = question("Who designed the Titanic?");
        assert_eq!(q.answer_type(), AnswerType::Person);

        let evidence = vec![unit(
            "The Titanic was designed by Thomas Andrews.",
            "https://example.org",
        )];
        let answers = engine().extract(&q, &evidence).await.unwrap();
        assert!(
            answers.iter().any(|a| a.contains("Thomas")),
            "answers: {:?}",
            answers
        );
        assert!(!answers.contains("Titanic"));
    }

    #[tokio::test]
    async fn test_definition_extraction() {
        let q = question("What is titanium?");
        assert_eq!(q.answer_type(), AnswerType::Definition);

        let evidence = vec![unit(
            "Titanium is a chemical element with low density.",
            "https://example.org",
        )];
        let answers = engine().extract(&q, &evidence).await.unwrap();
        assert!(
            answers.iter().any(|a| a.contains("chemical element")),
            "answers: {:?}",
            answers
        );
    }

    #[tokio::test]
    async fn test_no_evidence_is_empty_set() {
        let q = question("What year did the ship Titanic sink?");
        let answers = engine().extract(&q, &[]).await.unwrap();
        assert!(answers.is_empty());
    }

    #[test]
    fn test_zero_overlap_scores_zero() {
        let q = question("What year did the ship Titanic sink?");
        let parser = HeuristicParser::new();
        let parsed = parser.parse("Bananas ripen faster inside a paper bag.").unwrap();
        assert_eq!(engine().overlap_score(&q, &parsed), 0.0);
    }

    #[test]
    fn test_normalize_trims_punctuation() {
        assert_eq!(normalize("  1912. "), "1912");
        assert_eq!(normalize("\"Harland and Wolff\""), "Harland and Wolff");
    }
}

//! Pipeline orchestration and lifecycle
//!
//! `QasEngine` composes the classifier, a caller-supplied search engine,
//! and the answer engine into the single public `answer` operation. It owns
//! the parser resource: `shutdown` releases it and permanently closes the
//! engine. Downstream failures surface to the caller unchanged; there is no
//! retry and no silent recovery.

use crate::answer::AnswerEngine;
use crate::classifier::QuestionClassifier;
use crate::question::Question;
use metrics::{counter, gauge, histogram};
use quaero_common::parse::SentenceParser;
use quaero_common::{QaError, Result};
use quaero_retrieval::SearchEngine;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

const STATE_READY: u8 = 0;
const STATE_SHUTDOWN: u8 = 1;

/// The answering pipeline orchestrator
pub struct QasEngine {
    parser: Arc<dyn SentenceParser>,
    classifier: QuestionClassifier,
    answer_engine: AnswerEngine,
    state: AtomicU8,
}

impl QasEngine {
    /// Construct a ready engine, verifying each component reports
    /// successful initialization. A failed check is fatal: the caller
    /// must reconstruct.
    pub fn new(
        parser: Arc<dyn SentenceParser>,
        classifier: QuestionClassifier,
        answer_engine: AnswerEngine,
    ) -> Result<Self> {
        if !parser.ready() {
            return Err(QaError::EngineInit {
                message: "parser is not ready".into(),
            });
        }
        if !classifier.ready() {
            return Err(QaError::EngineInit {
                message: "question classifier is not ready".into(),
            });
        }

        Ok(Self {
            parser,
            classifier,
            answer_engine,
            state: AtomicU8::new(STATE_READY),
        })
    }

    /// Answer a question using the given search engine.
    ///
    /// Returns the deduplicated answer set; an empty set means "no answer
    /// found" and is a success. Parsing, classification, and retrieval
    /// failures propagate to the caller as typed errors.
    pub async fn answer(
        &self,
        question: &str,
        search_engine: &SearchEngine,
    ) -> Result<HashSet<String>> {
        if self.state.load(Ordering::Acquire) == STATE_SHUTDOWN {
            return Err(QaError::EngineClosed);
        }

        let started = Instant::now();
        let result = self.run_pipeline(question, search_engine).await;

        match &result {
            Ok(answers) => {
                counter!("quaero_questions_total", "outcome" => "ok").increment(1);
                gauge!("quaero_answers_count").set(answers.len() as f64);
                histogram!("quaero_answer_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                tracing::info!(
                    answers = answers.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Question answered"
                );
            }
            Err(e) => {
                counter!(
                    "quaero_pipeline_failures_total",
                    "stage" => format!("{:?}", e.stage())
                )
                .increment(1);
                tracing::warn!(stage = ?e.stage(), error = %e, "Pipeline failed");
            }
        }

        result
    }

    async fn run_pipeline(
        &self,
        question: &str,
        search_engine: &SearchEngine,
    ) -> Result<HashSet<String>> {
        let (parsed, answer_type) = self.classifier.classify(question)?;
        let question = Question::new(question, parsed, answer_type);

        tracing::debug!(answer_type = ?question.answer_type(), "Classified question");

        let evidence = search_engine.retrieve(question.raw()).await?;

        tracing::debug!(evidence_units = evidence.len(), "Evidence retrieved");

        self.answer_engine.extract(&question, &evidence).await
    }

    /// Release the parser resource and close the engine. Idempotent:
    /// only the first call releases; later calls are no-ops.
    pub fn shutdown(&self) -> Result<()> {
        let previous = self.state.swap(STATE_SHUTDOWN, Ordering::AcqRel);
        if previous == STATE_SHUTDOWN {
            return Ok(());
        }

        tracing::info!("Shutting down answering engine");
        self.parser.release()
    }

    /// Whether the engine still accepts `answer` calls
    pub fn is_ready(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_READY
    }
}

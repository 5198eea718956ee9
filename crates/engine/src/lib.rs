//! Quaero Answering Core
//!
//! The structural-matching heart of the pipeline:
//! - `QuestionClassifier`: maps a question to an expected answer type
//! - `Question`: parsed question with its focus token
//! - `AnswerEngine`: aligns question structure against evidence sentences
//!   and extracts candidate answer spans
//! - `QasEngine`: orchestrates classify → retrieve → extract with an
//!   explicit Ready/Shutdown lifecycle

mod answer;
mod classifier;
mod engine;
mod question;

pub use answer::AnswerEngine;
pub use classifier::{AnswerType, ClassifierModel, LexicalClassifier, QuestionClassifier};
pub use engine::QasEngine;
pub use question::Question;

//! Error types for the Quaero pipeline
//!
//! Provides:
//! - One typed failure per pipeline stage
//! - Fatal (construction-time) vs. per-call classification
//! - Stage tagging so callers can tell which stage failed

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using QaError
pub type Result<T> = std::result::Result<T, QaError>;

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Construction / resource loading
    Init,
    /// Syntactic parsing of question or evidence
    Parse,
    /// Answer-type classification
    Classify,
    /// Evidence retrieval via a search backend
    Retrieve,
    /// Orchestration and lifecycle
    Orchestrate,
}

/// Pipeline error types
#[derive(Error, Debug)]
pub enum QaError {
    // Construction-time failures
    #[error("Parser initialization failed: {message}")]
    ParserInit { message: String },

    #[error("Classifier model load failed: {path}: {message}")]
    ModelLoad { path: String, message: String },

    #[error("Engine initialization failed: {message}")]
    EngineInit { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // Per-call failures
    #[error("Parsing failed: {message}")]
    Parsing { message: String },

    #[error("Classification failed: {message}")]
    Classification { message: String },

    #[error("Retrieval failed: {message}")]
    Retrieval { message: String },

    #[error("Retrieval timed out after {timeout_ms}ms")]
    RetrievalTimeout { timeout_ms: u64 },

    // Lifecycle violations
    #[error("Engine is shut down; answer() is no longer valid")]
    EngineClosed,

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl QaError {
    /// Get the pipeline stage this error belongs to
    pub fn stage(&self) -> PipelineStage {
        match self {
            QaError::ParserInit { .. }
            | QaError::ModelLoad { .. }
            | QaError::EngineInit { .. }
            | QaError::Configuration { .. } => PipelineStage::Init,

            QaError::Parsing { .. } => PipelineStage::Parse,
            QaError::Classification { .. } => PipelineStage::Classify,

            QaError::Retrieval { .. } | QaError::RetrievalTimeout { .. } => {
                PipelineStage::Retrieve
            }

            QaError::EngineClosed | QaError::Other(_) => PipelineStage::Orchestrate,
        }
    }

    /// Fatal errors mean the engine must be reconstructed; there is no
    /// retry path for them
    pub fn is_fatal(&self) -> bool {
        self.stage() == PipelineStage::Init
    }

    /// Shorthand for a retrieval failure with a backend message
    pub fn retrieval(message: impl Into<String>) -> Self {
        QaError::Retrieval {
            message: message.into(),
        }
    }

    /// Shorthand for a parsing failure
    pub fn parsing(message: impl Into<String>) -> Self {
        QaError::Parsing {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for QaError {
    fn from(err: config::ConfigError) -> Self {
        QaError::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for QaError {
    fn from(err: std::io::Error) -> Self {
        QaError::ParserInit {
            message: err.to_string(),
        }
    }
}

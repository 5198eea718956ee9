//! Search engine: backend delegation and evidence normalization
//!
//! A thin adapter so the answering core never sees backend-specific
//! result shapes. No ranking, no filtering, no local recovery.

use crate::backend::{RawResult, RetrievalBackend};
use quaero_common::Result;
use std::sync::Arc;

/// One normalized retrieval result: text to mine for answers plus the
/// source it came from. Scoped to a single `answer` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUnit {
    /// Text body (the snippet)
    pub text: String,

    /// Source identifier (the link)
    pub source: String,
}

impl From<RawResult> for EvidenceUnit {
    fn from(raw: RawResult) -> Self {
        Self {
            text: raw.snippet,
            source: raw.link,
        }
    }
}

/// Composes a retrieval backend with result normalization
pub struct SearchEngine {
    backend: Arc<dyn RetrievalBackend>,
}

impl SearchEngine {
    pub fn new(backend: Arc<dyn RetrievalBackend>) -> Self {
        Self { backend }
    }

    /// Query the backend and normalize its raw results. Retrieval
    /// failures propagate unchanged; zero results is a success.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<EvidenceUnit>> {
        let raw = self.backend.search(query).await?;

        tracing::debug!(
            backend = self.backend.name(),
            query = query,
            units = raw.len(),
            "Retrieved evidence"
        );

        Ok(raw.into_iter().map(EvidenceUnit::from).collect())
    }
}

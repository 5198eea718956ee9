//! Retrieval backend capability trait

use quaero_common::Result;
use serde::{Deserialize, Serialize};

/// A raw search result as returned by a backend, before normalization.
/// Every backend, live or stubbed, produces this one shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawResult {
    /// Result title
    #[serde(default)]
    pub title: String,

    /// Source link
    #[serde(default)]
    pub link: String,

    /// Text snippet surrounding the match
    #[serde(default)]
    pub snippet: String,
}

impl RawResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }
}

/// Common trait for all retrieval backends.
///
/// An empty result sequence is success, not failure; backends fail with
/// `QaError::Retrieval` only on backend-level errors (network, auth,
/// quota, timeout).
#[async_trait::async_trait]
pub trait RetrievalBackend: Send + Sync {
    /// Issue one query and return its raw results in backend order
    async fn search(&self, query: &str) -> Result<Vec<RawResult>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

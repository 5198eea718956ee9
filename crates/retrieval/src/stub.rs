//! Deterministic stub backend for tests
//!
//! The pending-results queue is owned by the instance and injected at
//! construction, so concurrent tests cannot interfere through shared
//! process-wide state. `search` consumes whatever was registered and never
//! fails. The queue itself is not designed for parallel use within one
//! instance.

use crate::backend::{RawResult, RetrievalBackend};
use quaero_common::Result;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Pre-seeded backend with consume-on-search semantics
#[derive(Debug, Default)]
pub struct StubBackend {
    pending: Mutex<VecDeque<Vec<RawResult>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue one batch of results to be returned by the next `search`
    pub fn register(&self, items: Vec<RawResult>) {
        self.pending.lock().expect("stub queue poisoned").push_back(items);
    }

    /// Whether the pending queue holds no registered results
    pub fn is_empty(&self) -> bool {
        self.pending.lock().expect("stub queue poisoned").is_empty()
    }

    /// Drain and return all pending batches, flattened in registration order
    fn consume(&self) -> Vec<RawResult> {
        self.pending
            .lock()
            .expect("stub queue poisoned")
            .drain(..)
            .flatten()
            .collect()
    }
}

#[async_trait::async_trait]
impl RetrievalBackend for StubBackend {
    async fn search(&self, _query: &str) -> Result<Vec<RawResult>> {
        Ok(self.consume())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_until_registered() {
        let stub = StubBackend::new();
        assert!(stub.is_empty());

        stub.register(vec![RawResult::new("t", "l", "s")]);
        assert!(!stub.is_empty());
    }

    #[tokio::test]
    async fn test_search_consumes_pending() {
        let stub = StubBackend::new();
        stub.register(vec![RawResult::new("a", "la", "sa")]);
        stub.register(vec![RawResult::new("b", "lb", "sb")]);

        let results = stub.search("anything").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "a");
        assert!(stub.is_empty());

        // Consumed queue yields empty results, not an error
        let again = stub.search("anything").await.unwrap();
        assert!(again.is_empty());
    }
}

//! Live web search backend
//!
//! One outbound HTTP GET per `search` call against a JSON search API
//! (Custom Search style: `key`/`cx`/`q` parameters, `items` array of
//! title/link/snippet). Requests are bounded by a caller-configurable
//! timeout; expiry surfaces as a retrieval failure.

use crate::backend::{RawResult, RetrievalBackend};
use quaero_common::config::SearchConfig;
use quaero_common::{QaError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Live search API client
pub struct WebSearchBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
    max_results: usize,
    timeout_ms: u64,
}

#[derive(Deserialize)]
struct ApiResponse {
    /// Absent when the query matched nothing
    #[serde(default)]
    items: Vec<RawResult>,
}

impl WebSearchBackend {
    /// Build a backend from the search section of the pipeline config
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| QaError::Configuration {
            message: "search.api_key is required for the web backend".into(),
        })?;
        let engine_id = config.engine_id.clone().ok_or_else(|| QaError::Configuration {
            message: "search.engine_id is required for the web backend".into(),
        })?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QaError::Configuration {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            engine_id,
            max_results: config.max_results,
            timeout_ms: timeout.as_millis() as u64,
        })
    }
}

#[async_trait::async_trait]
impl RetrievalBackend for WebSearchBackend {
    async fn search(&self, query: &str) -> Result<Vec<RawResult>> {
        let num = self.max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QaError::RetrievalTimeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    QaError::retrieval(format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(QaError::retrieval(format!("API error {}: {}", status, body)));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| QaError::retrieval(format!("failed to parse response: {}", e)))?;

        tracing::debug!(
            query = query,
            results = parsed.items.len(),
            "Web search completed"
        );

        Ok(parsed.items)
    }

    fn name(&self) -> &str {
        "web"
    }
}

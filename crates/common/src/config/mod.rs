//! Configuration management for the Quaero pipeline
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with QUAERO__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuaeroConfig {
    /// Syntactic parser configuration
    pub parser: ParserConfig,

    /// Question classifier configuration
    pub classifier: ClassifierConfig,

    /// Search backend configuration
    pub search: SearchConfig,

    /// Answer extraction configuration
    pub answer: AnswerConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParserConfig {
    /// Directory holding the parser's resource bundle
    #[serde(default = "default_resource_dir")]
    pub resource_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Classifier provider: lexical, external
    #[serde(default = "default_classifier_provider")]
    pub provider: String,

    /// Path to the trained model artifact (external provider only)
    pub model_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Search API endpoint
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    /// API key for the live backend
    pub api_key: Option<String>,

    /// Search engine identifier (cx)
    pub engine_id: Option<String>,

    /// Maximum results to request per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Request timeout in seconds
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerConfig {
    /// Minimum structural overlap score for an evidence sentence
    #[serde(default = "default_min_overlap")]
    pub min_overlap: f32,

    /// Evidence sentences shorter than this many tokens are skipped
    #[serde(default = "default_min_sentence_tokens")]
    pub min_sentence_tokens: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_resource_dir() -> String { "res".to_string() }
fn default_classifier_provider() -> String { "lexical".to_string() }
fn default_search_endpoint() -> String { "https://www.googleapis.com/customsearch/v1".to_string() }
fn default_max_results() -> usize { 10 }
fn default_search_timeout() -> u64 { 10 }
fn default_min_overlap() -> f32 { 2.0 }
fn default_min_sentence_tokens() -> usize { 3 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }
fn default_service_name() -> String { "quaero".to_string() }

impl QuaeroConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with QUAERO__ prefix
            // e.g., QUAERO__SEARCH__TIMEOUT_SECS=5
            .add_source(
                Environment::with_prefix("QUAERO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("QUAERO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the retrieval timeout as Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search.timeout_secs)
    }
}

impl Default for QuaeroConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig {
                resource_dir: default_resource_dir(),
            },
            classifier: ClassifierConfig {
                provider: default_classifier_provider(),
                model_path: None,
            },
            search: SearchConfig {
                endpoint: default_search_endpoint(),
                api_key: None,
                engine_id: None,
                max_results: default_max_results(),
                timeout_secs: default_search_timeout(),
            },
            answer: AnswerConfig {
                min_overlap: default_min_overlap(),
                min_sentence_tokens: default_min_sentence_tokens(),
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
                service_name: default_service_name(),
            },
        }
    }
}

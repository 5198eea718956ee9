//! Quaero Common Library
//!
//! Shared code for the Quaero answering pipeline including:
//! - Error taxonomy and result alias
//! - Configuration management
//! - Parse data model (tokens, dependency trees) and the parser seam
//! - Sentence segmentation
//! - Metrics naming and registration

pub mod config;
pub mod errors;
pub mod metrics;
pub mod parse;
pub mod text;

// Re-export commonly used types
pub use config::QuaeroConfig;
pub use errors::{PipelineStage, QaError, Result};
pub use parse::{DepRel, ParsedSentence, PosTag, SentenceParser, Token};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

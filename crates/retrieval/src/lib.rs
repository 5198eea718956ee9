//! Quaero Retrieval Layer
//!
//! Pluggable evidence retrieval behind a single capability trait:
//! - `RetrievalBackend`: query string in, raw `{title, link, snippet}`
//!   results out
//! - `WebSearchBackend`: live JSON search API client
//! - `StubBackend`: deterministic pre-seeded backend for tests
//! - `SearchEngine`: normalizes raw results into evidence units

mod backend;
mod engine;
mod stub;
mod web;

pub use backend::{RawResult, RetrievalBackend};
pub use engine::{EvidenceUnit, SearchEngine};
pub use stub::StubBackend;
pub use web::WebSearchBackend;

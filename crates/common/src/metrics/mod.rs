//! Metrics naming and registration
//!
//! Standard metric names for the answering pipeline; exporters are
//! wired up by the embedding application.

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

/// Metrics prefix for all Quaero metrics
pub const METRICS_PREFIX: &str = "quaero";

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_questions_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of answered questions"
    );

    describe_counter!(
        format!("{}_pipeline_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Pipeline failures by stage"
    );

    describe_counter!(
        format!("{}_evidence_sentences_skipped_total", METRICS_PREFIX),
        Unit::Count,
        "Evidence sentences skipped (too short or unparseable)"
    );

    describe_histogram!(
        format!("{}_answer_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "End-to-end answer() latency in seconds"
    );

    describe_gauge!(
        format!("{}_answers_count", METRICS_PREFIX),
        Unit::Count,
        "Number of unique answers produced by the last call"
    );
}

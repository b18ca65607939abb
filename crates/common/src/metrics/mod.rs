//! Metrics and observability utilities
//!
//! Prometheus metrics via the `metrics` facade with standardized naming.
//! Without an installed recorder every call is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all DocForge metrics
pub const METRICS_PREFIX: &str = "docqa";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Document metrics
    describe_counter!(
        format!("{}_documents_uploaded_total", METRICS_PREFIX),
        Unit::Count,
        "Total documents uploaded"
    );

    describe_counter!(
        format!("{}_documents_rejected_total", METRICS_PREFIX),
        Unit::Count,
        "Uploads rejected during extraction or validation"
    );

    describe_counter!(
        format!("{}_documents_deleted_total", METRICS_PREFIX),
        Unit::Count,
        "Total documents deleted"
    );

    // Question metrics
    describe_counter!(
        format!("{}_questions_answered_total", METRICS_PREFIX),
        Unit::Count,
        "Total questions answered"
    );

    describe_histogram!(
        format!("{}_answer_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Answer synthesis latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record an accepted upload
pub fn record_upload(file_kind: &str, bytes: usize) {
    counter!(
        format!("{}_documents_uploaded_total", METRICS_PREFIX),
        "kind" => file_kind.to_string()
    )
    .increment(1);

    tracing::trace!(kind = file_kind, bytes, "Upload recorded");
}

/// Helper to record a rejected upload
pub fn record_rejected_upload(reason: &str) {
    counter!(
        format!("{}_documents_rejected_total", METRICS_PREFIX),
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Helper to record a deletion
pub fn record_deletion() {
    counter!(format!("{}_documents_deleted_total", METRICS_PREFIX)).increment(1);
}

/// Helper to record an answered question
pub fn record_answer(duration_secs: f64, intent: &str, source: &str) {
    counter!(
        format!("{}_questions_answered_total", METRICS_PREFIX),
        "intent" => intent.to_string(),
        "source" => source.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_answer_duration_seconds", METRICS_PREFIX),
        "intent" => intent.to_string()
    )
    .record(duration_secs);
}

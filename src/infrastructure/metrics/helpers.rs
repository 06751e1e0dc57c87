//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, HistogramTimer, TextEncoder};

use super::{
    PARTIALS_INCLUDED_TOTAL, PARTIALS_MISSING_TOTAL, RENDERS_TOTAL, RENDER_DURATION_SECONDS,
    VARIABLES_SUBSTITUTED_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording render metrics
pub struct RenderMetrics;

impl RenderMetrics {
    /// Start timing a render; the duration is observed when the timer is dropped
    pub fn start_timer() -> HistogramTimer {
        RENDER_DURATION_SECONDS.start_timer()
    }

    pub fn record_ok() {
        RENDERS_TOTAL.with_label_values(&["ok"]).inc();
    }

    pub fn record_not_found() {
        RENDERS_TOTAL.with_label_values(&["not_found"]).inc();
    }

    pub fn record_error() {
        RENDERS_TOTAL.with_label_values(&["error"]).inc();
    }
}

/// Helper struct for recording inclusion metrics
pub struct IncludeMetrics;

impl IncludeMetrics {
    pub fn record_included() {
        PARTIALS_INCLUDED_TOTAL.inc();
    }

    pub fn record_missing() {
        PARTIALS_MISSING_TOTAL.inc();
    }
}

/// Helper struct for recording substitution metrics
pub struct VariableMetrics;

impl VariableMetrics {
    /// Record a directive resolved from the binding set
    pub fn record_bound() {
        VARIABLES_SUBSTITUTED_TOTAL.with_label_values(&["binding"]).inc();
    }

    /// Record a directive resolved from its default
    pub fn record_default() {
        VARIABLES_SUBSTITUTED_TOTAL.with_label_values(&["default"]).inc();
    }
}

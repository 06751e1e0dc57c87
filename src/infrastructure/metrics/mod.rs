//! Prometheus metrics for the view renderer.
//!
//! This module provides metrics for monitoring view compilation:
//! - Render metrics (outcome counts, render latency)
//! - Inclusion metrics (partials included, partials missing)
//! - Substitution metrics (values taken from bindings vs. defaults)

mod helpers;

pub use helpers::{encode_metrics, IncludeMetrics, RenderMetrics, VariableMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "ara_view";

lazy_static! {
    // ============================================================================
    // Render Metrics
    // ============================================================================

    /// Total renders by outcome
    pub static ref RENDERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_renders_total", METRIC_PREFIX),
        "Total view renders",
        &["outcome"]
    ).unwrap();

    /// Render latency in seconds
    pub static ref RENDER_DURATION_SECONDS: Histogram = register_histogram!(
        format!("{}_render_duration_seconds", METRIC_PREFIX),
        "View render latency in seconds",
        vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25]
    ).unwrap();

    // ============================================================================
    // Inclusion Metrics
    // ============================================================================

    /// Partials successfully expanded in place
    pub static ref PARTIALS_INCLUDED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_partials_included_total", METRIC_PREFIX),
        "Total partial inclusions expanded"
    ).unwrap();

    /// Include directives left verbatim because the partial does not exist
    pub static ref PARTIALS_MISSING_TOTAL: IntCounter = register_int_counter!(
        format!("{}_partials_missing_total", METRIC_PREFIX),
        "Total include directives whose partial was missing"
    ).unwrap();

    // ============================================================================
    // Substitution Metrics
    // ============================================================================

    /// Variable directives resolved, by value source
    pub static ref VARIABLES_SUBSTITUTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_variables_substituted_total", METRIC_PREFIX),
        "Total variable directives substituted",
        &["source"]
    ).unwrap();
}

//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the IsoHunt connector server:
//! - HTTP request metrics (latency, counts)
//! - Cache freshness (collected dynamically)
//! - Core search and cache counters, registered from `isohunt_core::metrics`

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "isohunt_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("isohunt_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "isohunt_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics (collected dynamically)
// =============================================================================

/// Seconds since the last successful poll, -1 before the first one.
pub static CACHE_AGE_SECONDS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "isohunt_cache_age_seconds",
        "Seconds since the latest listing was last polled successfully",
    )
    .unwrap()
});

/// Poller running state (1 = running, 0 = stopped).
pub static POLLER_RUNNING: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "isohunt_poller_running",
        "Whether the cache poller is running (1) or stopped (0)",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Cache
    registry
        .register(Box::new(CACHE_AGE_SECONDS.clone()))
        .unwrap();
    registry.register(Box::new(POLLER_RUNNING.clone())).unwrap();

    // Core metrics (fetches, extraction, filtering, cache refreshes)
    for metric in isohunt_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// This is called before encoding metrics to update gauges with current values
/// from the cache and its poller.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let age = state
        .cache()
        .last_updated()
        .await
        .map(|last| (chrono::Utc::now() - last).num_seconds().max(0))
        .unwrap_or(-1);
    CACHE_AGE_SECONDS.set(age);

    let running = state.poller().map(|p| p.is_running()).unwrap_or(false);
    POLLER_RUNNING.set(if running { 1 } else { 0 });
}

static NUMERIC_SEGMENT: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"/\d+(/|$)").unwrap());

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    // Applied twice: adjacent numeric segments share a slash.
    let result = NUMERIC_SEGMENT.replace_all(path, "/{id}$1");
    let result = NUMERIC_SEGMENT.replace_all(&result, "/{id}$1");
    result.to_string()
}

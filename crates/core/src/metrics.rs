//! Prometheus metrics for the connector.
//!
//! This module provides metrics for:
//! - Site fetches and search queries
//! - Candidate extraction and rejection
//! - Latest-listing cache refreshes

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Site
// =============================================================================

/// Pages requested from the site, by outcome.
pub static PAGES_FETCHED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("isohunt_pages_fetched_total", "Total listing pages requested"),
        &["outcome"], // "success", "absent"
    )
    .unwrap()
});

/// Search queries issued, by mode.
pub static SEARCH_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("isohunt_search_queries_total", "Total search queries issued"),
        &["mode"], // "season", "episode"
    )
    .unwrap()
});

// =============================================================================
// Extraction and filtering
// =============================================================================

/// Candidates read from listing pages.
pub static CANDIDATES_EXTRACTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "isohunt_candidates_extracted_total",
        "Total candidates extracted from listing pages",
    )
    .unwrap()
});

/// Listing rows that could not be read.
pub static ROWS_SKIPPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "isohunt_rows_skipped_total",
        "Total listing rows skipped as unreadable",
    )
    .unwrap()
});

/// Candidates rejected, by rule.
pub static CANDIDATES_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "isohunt_candidates_rejected_total",
            "Total candidates rejected by the acceptance filter",
        ),
        &["reason"], // "no_seeders", "empty_title", "bad_release", "negative_rating"
    )
    .unwrap()
});

// =============================================================================
// Cache
// =============================================================================

/// Cache update attempts, by outcome.
pub static CACHE_REFRESHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("isohunt_cache_refreshes_total", "Total cache update attempts"),
        &["outcome"], // "skipped", "fetch_failed", "refreshed"
    )
    .unwrap()
});

/// Entries in the current cache snapshot.
pub static CACHE_ENTRIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("isohunt_cache_entries", "Entries in the latest-listing cache").unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PAGES_FETCHED.clone()),
        Box::new(SEARCH_QUERIES.clone()),
        Box::new(CANDIDATES_EXTRACTED.clone()),
        Box::new(ROWS_SKIPPED.clone()),
        Box::new(CANDIDATES_REJECTED.clone()),
        Box::new(CACHE_REFRESHES.clone()),
        Box::new(CACHE_ENTRIES.clone()),
    ]
}

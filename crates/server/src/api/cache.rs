//! Latest-listing cache API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use isohunt_core::{CacheEntry, CacheState, RefreshOutcome};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CacheQuery {
    /// Case-insensitive title filter.
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CacheResponse {
    pub last_updated: Option<DateTime<Utc>>,
    pub state: CacheState,
    pub min_interval_secs: u64,
    pub poller_running: bool,
    pub count: usize,
    pub entries: Vec<CacheEntry>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// GET /api/v1/cache
pub async fn get_cache(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CacheQuery>,
) -> Json<CacheResponse> {
    let cache = state.cache();
    let snapshot = cache.snapshot().await;

    let entries = match query.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => cache.find(title).await,
        _ => snapshot.entries.clone(),
    };

    Json(CacheResponse {
        last_updated: snapshot.last_updated,
        state: cache.state().await,
        min_interval_secs: cache.min_interval().as_secs(),
        poller_running: state.poller().map(|p| p.is_running()).unwrap_or(false),
        count: entries.len(),
        entries,
    })
}

/// POST /api/v1/cache/refresh
///
/// Attempt an update now. Still honours the minimum interval.
pub async fn refresh_cache(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let outcome = state.cache().update().await;
    let entries = match outcome {
        RefreshOutcome::Refreshed { entries } => Some(entries),
        RefreshOutcome::Skipped | RefreshOutcome::FetchFailed => None,
    };
    Json(RefreshResponse {
        outcome: outcome.as_str().to_string(),
        entries,
        last_updated: state.cache().last_updated().await,
    })
}

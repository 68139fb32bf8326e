//! Search API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use isohunt_core::{Episode, EpisodeStatus, QueryGroup, SearchResults, Show};

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EpisodeSearchRequest {
    pub show: Show,
    pub season: u32,
    pub episode: u32,
}

#[derive(Debug, Deserialize)]
pub struct SeasonSearchRequest {
    pub show: Show,
    pub season: u32,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub show: String,
    pub queries: QueryGroup,
    pub total: usize,
    #[serde(flatten)]
    pub results: SearchResults,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn require_names(show: &Show) -> Result<(), ApiError> {
    if show.all_names().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Show needs a name or at least one alias".to_string(),
            }),
        ));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/search/episode
///
/// Search for a single episode. An episode the show does not list is searched
/// for as wanted.
pub async fn search_episode(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EpisodeSearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    require_names(&body.show)?;

    let episode = body
        .show
        .find_episode(body.season, body.episode)
        .cloned()
        .unwrap_or_else(|| Episode::new(body.season, body.episode, EpisodeStatus::Wanted));

    let provider = state.provider();
    let queries = provider.query_builder().episode_group(&body.show, &episode);
    let results = provider.search(&queries).await;

    info!(
        show = %body.show.name,
        season = body.season,
        episode = body.episode,
        results = results.len(),
        "Episode search via API"
    );

    Ok(Json(SearchResponse {
        show: body.show.name,
        queries,
        total: results.len(),
        results,
    }))
}

/// POST /api/v1/search/season
///
/// Search for every wanted episode of a season, season packs first.
pub async fn search_season(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SeasonSearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    require_names(&body.show)?;

    let provider = state.provider();
    let queries = provider
        .query_builder()
        .season_queries(&body.show, body.season);
    let results = if queries.is_empty() {
        SearchResults::default()
    } else {
        provider.search(&queries).await
    };

    info!(
        show = %body.show.name,
        season = body.season,
        results = results.len(),
        "Season search via API"
    );

    Ok(Json(SearchResponse {
        show: body.show.name,
        queries,
        total: results.len(),
        results,
    }))
}

/// POST /api/v1/search/queries
///
/// The query group a season search would issue, without contacting the site.
pub async fn preview_queries(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SeasonSearchRequest>,
) -> Result<Json<QueryGroup>, ApiError> {
    require_names(&body.show)?;
    Ok(Json(
        state
            .provider()
            .query_builder()
            .season_queries(&body.show, body.season),
    ))
}

//! End-to-end tests with a mocked site.
//!
//! These tests run the full server stack in-process with a scripted fetcher
//! standing in for the IsoHunt listing and search pages.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};

fn got_page() -> String {
    fixtures::listing_page(&[
        fixtures::listing_row(
            467572511,
            "<b>Game.of.Thrones</b>.S03E01.HDTV.x264-2HD.mp4",
            "+24",
            28,
            45449,
            2650,
        ),
        fixtures::listing_row(467572512, "Game.of.Thrones.S03E01.SUBPACK", "+1", 0, 9, 1),
    ])
}

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["provider"], "IsoHunt");
}

#[tokio::test]
async fn test_config_endpoint_returns_effective_config() {
    let fixture = TestFixture::with_config(
        r#"
[cache]
min_interval_mins = 5

[filter]
ignore_words = ["german"]
"#,
    )
    .await;

    let response = fixture.get("/api/v1/config").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["cache"]["min_interval_mins"], 5);
    assert_eq!(response.body["site"]["base_url"], "https://isohunt.com");
    assert_eq!(response.body["filter"]["ignore_words"][0], "german");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/tickets").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_episode_search() {
    let fixture = TestFixture::new().await;
    fixture.fetcher.set_response("ihq=", got_page()).await;

    let response = fixture
        .post(
            "/api/v1/search/episode",
            json!({
                "show": { "name": "Game of Thrones" },
                "season": 3,
                "episode": 1
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["show"], "Game of Thrones");
    assert_eq!(response.body["total"], 1);
    assert_eq!(
        response.body["queries"]["sets"][0]["queries"][0],
        "Game.of.Thrones S03E01 OR 3x01 OR 03x01"
    );

    let mode = &response.body["modes"][0];
    assert_eq!(mode["mode"], "episode");
    assert_eq!(mode["aborted"], false);

    let candidate = &mode["candidates"][0];
    assert_eq!(candidate["title"], "Game.of.Thrones.S03E01.HDTV.x264-2HD.mp4");
    assert_eq!(candidate["identifier"], 467572511u64);
    assert_eq!(candidate["rating"], "+24");
    assert_eq!(candidate["seeder_count"], 45449);
    assert_eq!(
        candidate["location"],
        "https://ca.isohunt.com/download/467572511/467572511.torrent"
    );
}

#[tokio::test]
async fn test_season_search_reports_aborted_mode() {
    let fixture = TestFixture::new().await;
    fixture.fetcher.set_absent("Season+1").await;
    fixture
        .fetcher
        .set_default_response(Some(fixtures::listing_page(&[])))
        .await;

    let response = fixture
        .post(
            "/api/v1/search/season",
            json!({
                "show": {
                    "name": "Lost",
                    "episodes": [
                        { "season": 1, "episode": 1, "status": "wanted" },
                        { "season": 1, "episode": 2, "status": "qual" }
                    ]
                },
                "season": 1
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let modes = response.body["modes"].as_array().unwrap();
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[0]["mode"], "season");
    assert_eq!(modes[0]["aborted"], true);
    assert_eq!(modes[0]["queries_issued"], 2);
    assert_eq!(modes[1]["mode"], "episode");
    assert_eq!(modes[1]["aborted"], false);
    assert_eq!(modes[1]["queries_issued"], 2);
}

#[tokio::test]
async fn test_season_search_with_nothing_wanted() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/api/v1/search/season",
            json!({
                "show": {
                    "name": "Lost",
                    "episodes": [{ "season": 1, "episode": 1, "status": "good" }]
                },
                "season": 1
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 0);
    assert!(response.body["queries"]["sets"].as_array().unwrap().is_empty());
    assert_eq!(fixture.fetcher.request_count().await, 0);
}

#[tokio::test]
async fn test_query_preview_does_not_fetch() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/api/v1/search/queries",
            json!({
                "show": {
                    "name": "Lost",
                    "aliases": ["Lost (2004)"],
                    "episodes": [{ "season": 2, "episode": 5, "status": "wanted" }]
                },
                "season": 2
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let sets = response.body["sets"].as_array().unwrap();
    assert_eq!(sets[0]["mode"], "season");
    assert_eq!(sets[0]["queries"][0], "Lost S02");
    assert_eq!(sets[1]["mode"], "episode");
    assert_eq!(sets[1]["queries"][1], "Lost.2004 S02E05 OR 2x05 OR 02x05");
    assert_eq!(fixture.fetcher.request_count().await, 0);
}

#[tokio::test]
async fn test_search_requires_a_name() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/api/v1/search/episode",
            json!({ "show": { "name": "  " }, "season": 1, "episode": 1 }),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_search_body_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_raw("/api/v1/search/episode", "{\"show\": ")
        .await;
    assert!(response.status.is_client_error());

    let response = fixture
        .post("/api/v1/search/episode", json!({ "season": 1 }))
        .await;
    assert!(response.status.is_client_error());
}

// =============================================================================
// Cache Tests
// =============================================================================

#[tokio::test]
async fn test_cache_starts_empty() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/cache").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.body["last_updated"].is_null());
    assert_eq!(response.body["state"], "fresh");
    assert_eq!(response.body["count"], 0);
    assert_eq!(response.body["min_interval_secs"], 900);
    assert_eq!(response.body["poller_running"], false);
}

#[tokio::test]
async fn test_cache_refresh_then_skip() {
    let fixture = TestFixture::new().await;
    fixture.fetcher.set_response("ihs1=5", got_page()).await;

    let response = fixture.post("/api/v1/cache/refresh", json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["outcome"], "refreshed");
    assert_eq!(response.body["entries"], 1);
    assert!(response.body["last_updated"].is_string());

    let response = fixture.post("/api/v1/cache/refresh", json!({})).await;
    assert_eq!(response.body["outcome"], "skipped");
    assert!(response.body.get("entries").is_none());

    let response = fixture.get("/api/v1/cache").await;
    assert_eq!(response.body["state"], "stale");
    assert_eq!(response.body["count"], 1);
    assert_eq!(
        response.body["entries"][0]["url"],
        "https://ca.isohunt.com/download/467572511/467572511.torrent"
    );
    assert_eq!(fixture.fetcher.request_count().await, 1);
}

#[tokio::test]
async fn test_cache_refresh_failure() {
    let fixture = TestFixture::new().await;

    let response = fixture.post("/api/v1/cache/refresh", json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["outcome"], "fetch_failed");
    assert!(response.body["last_updated"].is_null());
}

#[tokio::test]
async fn test_cache_title_filter() {
    let fixture = TestFixture::with_config(
        r#"
[cache]
min_interval_mins = 0
"#,
    )
    .await;
    fixture
        .fetcher
        .set_response(
            "ihs1=5",
            fixtures::listing_page(&[
                fixtures::listing_row(1, "Lost.S01E01.HDTV", "+1", 0, 5, 0),
                fixtures::listing_row(2, "Fringe.S02E03.HDTV", "+1", 0, 5, 0),
            ]),
        )
        .await;

    fixture.post("/api/v1/cache/refresh", json!({})).await;

    let response = fixture.get("/api/v1/cache?title=fringe").await;
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["entries"][0]["title"], "Fringe.S02E03.HDTV");

    let response = fixture.get("/api/v1/cache?title=").await;
    assert_eq!(response.body["count"], 2);
}

// =============================================================================
// Metrics Tests
// =============================================================================

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.get("/api/v1/health").await;

    let (status, body) = fixture.get_text("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("isohunt_http_requests_total"));
    assert!(body.contains("isohunt_cache_age_seconds"));
    assert!(body.contains("isohunt_poller_running 0"));
}

//! Search flow integration tests.
//!
//! These tests drive the provider end to end against scripted listing pages:
//! show description -> query group -> fetched pages -> accepted candidates

use std::sync::Arc;

use chrono::NaiveDate;

use isohunt_core::{
    load_config_from_str,
    testing::{fixtures, MockFetcher},
    Episode, EpisodeStatus, IsoHuntProvider, QueryMode, Show, SiteUrls,
};

fn provider(fetcher: &MockFetcher) -> IsoHuntProvider {
    IsoHuntProvider::new(SiteUrls::default(), Arc::new(fetcher.clone()))
}

#[tokio::test]
async fn test_episode_search_extracts_listing_row() {
    let fetcher = MockFetcher::new();
    fetcher
        .set_response(
            "ihq=Game.of.Thrones",
            fixtures::listing_page(&[
                fixtures::ad_row(),
                fixtures::listing_row(
                    467572511,
                    "<b>Game.of.Thrones</b>.S03E01.HDTV.x264-2HD.mp4",
                    "+24",
                    28,
                    45449,
                    2650,
                ),
            ]),
        )
        .await;

    let show = Show::new("Game of Thrones");
    let episode = Episode::new(3, 1, EpisodeStatus::Wanted);
    let results = provider(&fetcher).find_episode(&show, &episode).await;

    assert_eq!(
        fetcher.recorded_requests().await,
        vec!["https://isohunt.com/torrents/?ihq=Game.of.Thrones+S03E01+OR+3x01+OR+03x01"]
    );

    let candidates: Vec<_> = results.candidates().collect();
    assert_eq!(candidates.len(), 1);
    let candidate = candidates[0];
    assert_eq!(candidate.title(), "Game.of.Thrones.S03E01.HDTV.x264-2HD.mp4");
    assert_eq!(candidate.identifier(), 467572511);
    assert_eq!(candidate.rating(), "+24");
    assert_eq!(candidate.comment_count(), 28);
    assert_eq!(candidate.seeder_count(), 45449);
    assert_eq!(candidate.leecher_count(), 2650);
    assert_eq!(
        candidate.location(),
        "https://ca.isohunt.com/download/467572511/467572511.torrent"
    );
}

#[tokio::test]
async fn test_season_search_runs_season_then_episode_queries() {
    let fetcher = MockFetcher::new();
    fetcher
        .set_default_response(Some(fixtures::listing_page(&[])))
        .await;

    let show = fixtures::show_with_season(
        "Lost",
        2,
        &[EpisodeStatus::Wanted, EpisodeStatus::Wanted],
    );
    let results = provider(&fetcher).find_season(&show, 2).await;

    assert_eq!(
        fetcher.recorded_requests().await,
        vec![
            "https://isohunt.com/torrents/?ihq=Lost+S02",
            "https://isohunt.com/torrents/?ihq=Lost+Season+2+-Ep%2A",
            "https://isohunt.com/torrents/?ihq=Lost+S02E01+OR+2x01+OR+02x01",
            "https://isohunt.com/torrents/?ihq=Lost+S02E02+OR+2x02+OR+02x02",
        ]
    );
    let modes: Vec<QueryMode> = results.modes.iter().map(|m| m.mode).collect();
    assert_eq!(modes, vec![QueryMode::Season, QueryMode::Episode]);
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_partial_season_skips_season_queries() {
    let fetcher = MockFetcher::new();
    fetcher
        .set_default_response(Some(fixtures::listing_page(&[])))
        .await;

    let show = fixtures::show_with_season(
        "Lost",
        1,
        &[EpisodeStatus::Good, EpisodeStatus::Wanted, EpisodeStatus::Qual],
    );
    let results = provider(&fetcher).find_season(&show, 1).await;

    assert_eq!(fetcher.request_count().await, 2);
    assert!(results.for_mode(QueryMode::Season).is_none());
    assert_eq!(
        results.for_mode(QueryMode::Episode).map(|m| m.queries_issued),
        Some(2)
    );
}

#[tokio::test]
async fn test_absent_page_stops_remaining_episode_queries() {
    let fetcher = MockFetcher::new();
    fetcher.set_absent("S01E01").await;
    fetcher
        .set_default_response(Some(fixtures::listing_page(&[])))
        .await;

    let show = Show::new("Show").with_episodes(vec![
        Episode::new(1, 1, EpisodeStatus::Wanted),
        Episode::new(1, 2, EpisodeStatus::Wanted),
        Episode::new(1, 3, EpisodeStatus::Good),
    ]);
    let results = provider(&fetcher).find_season(&show, 1).await;

    let requests = fetcher.recorded_requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("S01E01"));

    let episode = results.for_mode(QueryMode::Episode).unwrap();
    assert!(episode.aborted);
    assert_eq!(episode.queries_issued, 1);
}

#[tokio::test]
async fn test_air_by_date_show_searches_by_date() {
    let fetcher = MockFetcher::new();
    fetcher
        .set_default_response(Some(fixtures::listing_page(&[fixtures::listing_row(
            10,
            "The.Daily.Show.2013.04.01.HDTV.x264",
            "+0",
            0,
            12,
            3,
        )])))
        .await;

    let show = Show::new("The Daily Show").with_air_by_date(true);
    let episode = Episode::new(18, 40, EpisodeStatus::Wanted)
        .with_air_date(NaiveDate::from_ymd_opt(2013, 4, 1).unwrap());
    let results = provider(&fetcher).find_episode(&show, &episode).await;

    assert_eq!(
        fetcher.recorded_requests().await,
        vec!["https://isohunt.com/torrents/?ihq=The.Daily.Show+2013-04-01"]
    );
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_configured_ignore_words_reject_candidates() {
    let config = load_config_from_str(
        r#"
[site]
base_url = "http://mirror.local/"
download_url = "http://dl.mirror.local"

[filter]
ignore_words = ["german"]
"#,
    )
    .unwrap();

    let fetcher = MockFetcher::new();
    fetcher
        .set_default_response(Some(fixtures::listing_page(&[
            fixtures::listing_row(1, "Show.S01E01.GERMAN.HDTV", "+1", 0, 5, 0),
            fixtures::listing_row(2, "Show.S01E01.HDTV", "+1", 0, 5, 0),
        ])))
        .await;

    let provider = IsoHuntProvider::from_config(&config, Arc::new(fetcher.clone()));
    let show = Show::new("Show");
    let episode = Episode::new(1, 1, EpisodeStatus::Wanted);
    let results = provider.find_episode(&show, &episode).await;

    let ids: Vec<u64> = results.candidates().map(|c| c.identifier()).collect();
    assert_eq!(ids, vec![2]);
    assert!(fetcher.recorded_requests().await[0].starts_with("http://mirror.local/torrents/"));
    assert_eq!(
        results.candidates().next().unwrap().location(),
        "http://dl.mirror.local/download/2/2.torrent"
    );
}

#[tokio::test]
async fn test_aliases_add_queries_per_name() {
    let fetcher = MockFetcher::new();
    fetcher
        .set_default_response(Some(fixtures::listing_page(&[])))
        .await;

    let show = Show::new("Top Gear")
        .with_aliases(["Top Gear UK"])
        .with_episodes(vec![Episode::new(5, 1, EpisodeStatus::Wanted)]);
    provider(&fetcher).find_season(&show, 5).await;

    let requests = fetcher.recorded_requests().await;
    assert_eq!(requests.len(), 6);
    assert!(requests.iter().any(|r| r.ends_with("ihq=Top+Gear+UK+S05")));
    assert!(requests
        .iter()
        .any(|r| r.ends_with("ihq=Top.Gear.UK+S05E01+OR+5x01+OR+05x01")));
}

//! Query builder for season and episode searches.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::{EpisodeNaming, QueryGroup, SceneNaming};
use crate::show::{Episode, Show};

/// Builds site queries for every alias of a show.
///
/// Finished queries are deduplicated in first-seen order, so aliases that
/// sanitize to the same name never send the same query twice.
#[derive(Clone)]
pub struct QueryBuilder {
    naming: Arc<dyn EpisodeNaming>,
}

impl QueryBuilder {
    /// Create a query builder using scene naming conventions.
    pub fn new() -> Self {
        Self::with_naming(Arc::new(SceneNaming))
    }

    pub fn with_naming(naming: Arc<dyn EpisodeNaming>) -> Self {
        Self { naming }
    }

    /// One query per alias for a single episode.
    ///
    /// Air-by-date shows are searched by date (`Name 2013-03-31`), others by
    /// three alternative episode codes (`Name S03E01 OR 3x01 OR 03x01`).
    pub fn episode_queries(&self, show: &Show, episode: &Episode) -> Vec<String> {
        let names = show.all_names();

        let queries: Vec<String> = if show.air_by_date {
            let Some(air_date) = episode.air_date else {
                debug!(
                    show = %show.name,
                    season = episode.season,
                    episode = episode.episode,
                    "Air-by-date episode has no air date, skipping"
                );
                return Vec::new();
            };
            names
                .iter()
                .map(|name| {
                    format!(
                        "{} {}",
                        self.naming.sanitize_show_name(name),
                        air_date.format("%Y-%m-%d")
                    )
                })
                .collect()
        } else {
            let [first, second, third] = self.naming.episode_codes(episode.season, episode.episode);
            names
                .iter()
                .map(|name| {
                    format!(
                        "{} {} OR {} OR {}",
                        self.naming.sanitize_show_name(name),
                        first,
                        second,
                        third
                    )
                })
                .collect()
        };

        let queries = dedup_in_order(queries);
        debug!(show = %show.name, queries = ?queries, "Episode search strings");
        queries
    }

    /// Query group for a single episode.
    pub fn episode_group(&self, show: &Show, episode: &Episode) -> QueryGroup {
        QueryGroup::new(Vec::new(), self.episode_queries(show, episode))
    }

    /// Query group for every wanted episode of `season`.
    ///
    /// When the whole season is wanted (and the show is numbered by season),
    /// season-pack queries are added ahead of the per-episode ones so a single
    /// pack can satisfy the request. Nothing wanted yields an empty group.
    pub fn season_queries(&self, show: &Show, season: u32) -> QueryGroup {
        let season_episodes = show.season_episodes(season);
        let wanted: Vec<&Episode> = season_episodes
            .iter()
            .copied()
            .filter(|e| e.status.is_wanted())
            .collect();

        let mut season_queries = Vec::new();
        if wanted.len() == season_episodes.len() && !show.air_by_date {
            for name in show.all_names() {
                season_queries.push(format!("{} S{:02}", name, season));
                season_queries.push(format!("{} Season {} -Ep*", name, season));
            }
        }

        let episode_queries: Vec<String> = wanted
            .iter()
            .flat_map(|ep| self.episode_queries(show, ep))
            .collect();

        let group = QueryGroup::new(
            dedup_in_order(season_queries),
            dedup_in_order(episode_queries),
        );
        if group.is_empty() {
            debug!(show = %show.name, season, "No wanted episodes in season");
        } else {
            debug!(show = %show.name, season, group = ?group, "Season search strings");
        }
        group
    }
}

/// Drop repeated queries, keeping the first occurrence of each.
fn dedup_in_order(queries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    queries
        .into_iter()
        .filter(|q| seen.insert(q.clone()))
        .collect()
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("naming", &"<naming>")
            .finish()
    }
}

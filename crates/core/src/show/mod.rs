//! Show and episode description supplied by the caller.
//!
//! The connector never owns this data; it only reads alias names, the
//! air-date flag and per-episode wanted status to decide what to search for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Download status of a single episode, as seen by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    /// Missing and wanted.
    Wanted,
    /// Present, but a better quality is wanted.
    Qual,
    /// Present at an acceptable quality.
    Good,
    /// Deliberately not wanted.
    Skipped,
    /// Not aired yet.
    Unaired,
    /// Already handed to a downloader.
    Snatched,
}

impl EpisodeStatus {
    /// Whether an episode in this state should be searched for.
    pub fn is_wanted(self) -> bool {
        matches!(self, EpisodeStatus::Wanted | EpisodeStatus::Qual)
    }
}

/// A single episode of a show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_date: Option<NaiveDate>,
    pub status: EpisodeStatus,
}

impl Episode {
    pub fn new(season: u32, episode: u32, status: EpisodeStatus) -> Self {
        Self {
            season,
            episode,
            air_date: None,
            status,
        }
    }

    pub fn with_air_date(mut self, air_date: NaiveDate) -> Self {
        self.air_date = Some(air_date);
        self
    }
}

/// A show with every alias it may be released under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Show {
    pub name: String,
    /// Scene exceptions and other alternative names.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Episodes are numbered by air date instead of season/episode.
    #[serde(default)]
    pub air_by_date: bool,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Show {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            air_by_date: false,
            episodes: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_air_by_date(mut self, air_by_date: bool) -> Self {
        self.air_by_date = air_by_date;
        self
    }

    pub fn with_episodes(mut self, episodes: Vec<Episode>) -> Self {
        self.episodes = episodes;
        self
    }

    /// The show name followed by its aliases, duplicates and blanks removed.
    pub fn all_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .filter(|n| seen.insert(n.to_string()))
            .map(String::from)
            .collect()
    }

    /// All known episodes of `season`, in episode order.
    pub fn season_episodes(&self, season: u32) -> Vec<&Episode> {
        let mut episodes: Vec<_> = self.episodes.iter().filter(|e| e.season == season).collect();
        episodes.sort_by_key(|e| e.episode);
        episodes
    }

    /// Distinct season numbers, ascending.
    pub fn seasons(&self) -> Vec<u32> {
        self.episodes
            .iter()
            .map(|e| e.season)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn find_episode(&self, season: u32, episode: u32) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.season == season && e.episode == episode)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted item of the latest listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub title: String,
    pub url: String,
}

/// The accepted content of the last successful poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// When the last successful poll happened. `None` until the first one.
    pub last_updated: Option<DateTime<Utc>>,
    pub entries: Vec<CacheEntry>,
}

impl CacheSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether the cache may poll the site right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    /// The minimum interval has not elapsed since the last successful poll.
    Stale,
    /// A poll is allowed.
    Fresh,
}

/// What an update attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Polled too recently, nothing changed.
    Skipped,
    /// The site returned nothing; the snapshot and its timestamp are untouched.
    FetchFailed,
    /// The snapshot was replaced.
    Refreshed { entries: usize },
}

impl RefreshOutcome {
    /// Metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshOutcome::Skipped => "skipped",
            RefreshOutcome::FetchFailed => "fetch_failed",
            RefreshOutcome::Refreshed { .. } => "refreshed",
        }
    }
}

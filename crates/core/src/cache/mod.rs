//! Time-gated snapshot of the site's latest listing.
//!
//! The snapshot is rebuilt wholesale on every successful poll and swapped in
//! as one `Arc`, so readers see either the old content or the new one.

mod poller;
mod types;

pub use poller::CachePoller;
pub use types::*;

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::metrics::{CACHE_ENTRIES, CACHE_REFRESHES};
use crate::searcher::IsoHuntProvider;

/// Default minimum time between two successful polls.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(15 * 60);

pub struct RefreshCache {
    provider: Arc<IsoHuntProvider>,
    min_interval: Duration,
    snapshot: RwLock<Arc<CacheSnapshot>>,
    /// Serialises update attempts so concurrent callers respect the interval.
    update_lock: Mutex<()>,
}

impl RefreshCache {
    pub fn new(provider: Arc<IsoHuntProvider>, min_interval: Duration) -> Self {
        Self {
            provider,
            min_interval,
            snapshot: RwLock::new(Arc::new(CacheSnapshot::default())),
            update_lock: Mutex::new(()),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// The current snapshot. Cheap to call; the returned value never changes.
    pub async fn snapshot(&self) -> Arc<CacheSnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    pub async fn last_updated(&self) -> Option<chrono::DateTime<Utc>> {
        self.snapshot.read().await.last_updated
    }

    pub async fn state(&self) -> CacheState {
        if self.min_interval.is_zero() {
            return CacheState::Fresh;
        }
        let Some(last) = self.last_updated().await else {
            return CacheState::Fresh;
        };

        // A clock that went backwards counts as "not elapsed".
        let elapsed = (Utc::now() - last).to_std().ok();
        match elapsed {
            Some(elapsed) if elapsed >= self.min_interval => CacheState::Fresh,
            _ => CacheState::Stale,
        }
    }

    pub async fn should_update(&self) -> bool {
        self.state().await == CacheState::Fresh
    }

    /// Poll the latest listing if the interval allows it.
    ///
    /// Receiving any page counts as a successful poll, even one without a
    /// single usable candidate. A missing page leaves everything as it was,
    /// so the next attempt is allowed straight away.
    pub async fn update(&self) -> RefreshOutcome {
        let _guard = self.update_lock.lock().await;
        let outcome = self.update_locked().await;
        CACHE_REFRESHES.with_label_values(&[outcome.as_str()]).inc();
        outcome
    }

    async fn update_locked(&self) -> RefreshOutcome {
        if !self.should_update().await {
            debug!(provider = self.provider.name(), "Cache polled recently, skipping update");
            return RefreshOutcome::Skipped;
        }

        let url = self.provider.urls().latest();
        debug!(provider = self.provider.name(), url = %url, "Cache update URL");

        let Some(data) = self.provider.fetch_page(&url).await else {
            return RefreshOutcome::FetchFailed;
        };
        let polled_at = Utc::now();

        info!(
            provider = self.provider.name(),
            "Clearing cache and updating with new information"
        );

        let entries: Vec<CacheEntry> = self
            .provider
            .items_from_data(&data)
            .into_iter()
            .filter(|c| self.provider.is_acceptable(c))
            .filter_map(|c| {
                let (title, url) = self.provider.title_and_url(&c);
                if title.is_empty() || url.is_empty() {
                    return None;
                }
                debug!(title = %title, "Adding item to cache");
                Some(CacheEntry { title, url })
            })
            .collect();

        let count = entries.len();
        *self.snapshot.write().await = Arc::new(CacheSnapshot {
            last_updated: Some(polled_at),
            entries,
        });
        CACHE_ENTRIES.set(count as i64);

        RefreshOutcome::Refreshed { entries: count }
    }

    /// Cached entries whose title contains `needle`, case-insensitively.
    pub async fn find(&self, needle: &str) -> Vec<CacheEntry> {
        let needle = needle.to_lowercase();
        self.snapshot()
            .await
            .entries
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for RefreshCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCache")
            .field("provider", &self.provider.name())
            .field("min_interval", &self.min_interval)
            .finish()
    }
}

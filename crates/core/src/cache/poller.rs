//! Background task that keeps the latest-listing cache warm.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{RefreshCache, RefreshOutcome};

/// Calls [`RefreshCache::update`] on a fixed tick.
///
/// Most ticks are no-ops: the cache itself decides whether the minimum
/// interval has elapsed.
pub struct CachePoller {
    cache: Arc<RefreshCache>,
    tick: Duration,
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl CachePoller {
    pub fn new(cache: Arc<RefreshCache>, tick: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            cache,
            tick,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Spawn the polling loop. The first poll happens immediately.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Cache poller already running");
            return;
        }

        let cache = Arc::clone(&self.cache);
        let running = Arc::clone(&self.running);
        let tick = self.tick;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!(tick_secs = tick.as_secs(), "Cache poller started");
            Self::poll_once(&cache).await;
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Cache poller received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(tick) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        Self::poll_once(&cache).await;
                    }
                }
            }
            info!("Cache poller stopped");
        });
    }

    /// Signal the polling loop to stop.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Cache poller not running");
            return;
        }
        let _ = self.shutdown_tx.send(());
    }

    async fn poll_once(cache: &RefreshCache) {
        match cache.update().await {
            RefreshOutcome::Refreshed { entries } => {
                info!(entries, "Latest listing cached");
            }
            RefreshOutcome::FetchFailed => {
                warn!("Latest listing unavailable, will retry on next tick");
            }
            RefreshOutcome::Skipped => {
                debug!("Latest listing still fresh");
            }
        }
    }
}

impl std::fmt::Debug for CachePoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachePoller")
            .field("tick", &self.tick)
            .field("running", &self.is_running())
            .finish()
    }
}

use std::sync::Arc;
use isohunt_core::{CachePoller, Config, Fetcher, IsoHuntProvider, RefreshCache};

/// Shared application state
pub struct AppState {
    config: Config,
    provider: Arc<IsoHuntProvider>,
    cache: Arc<RefreshCache>,
    poller: Option<Arc<CachePoller>>,
}

impl AppState {
    pub fn new(
        config: Config,
        provider: Arc<IsoHuntProvider>,
        cache: Arc<RefreshCache>,
        poller: Option<Arc<CachePoller>>,
    ) -> Self {
        Self {
            config,
            provider,
            cache,
            poller,
        }
    }

    /// Wire the provider, the latest-listing cache and (when enabled) the
    /// poller from configuration. The poller is returned stopped.
    pub fn from_config(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        let provider = Arc::new(IsoHuntProvider::from_config(&config, fetcher));
        let cache = Arc::new(RefreshCache::new(
            Arc::clone(&provider),
            config.cache.min_interval(),
        ));
        let poller = config
            .cache
            .poll_enabled
            .then(|| Arc::new(CachePoller::new(Arc::clone(&cache), config.cache.poll_tick())));

        Self::new(config, provider, cache, poller)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &IsoHuntProvider {
        self.provider.as_ref()
    }

    pub fn cache(&self) -> &RefreshCache {
        self.cache.as_ref()
    }

    pub fn poller(&self) -> Option<&CachePoller> {
        self.poller.as_deref()
    }
}

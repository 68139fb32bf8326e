pub mod cache;
pub mod config;
pub mod metrics;
pub mod query;
pub mod searcher;
pub mod show;
pub mod testing;

pub use cache::{
    CacheEntry, CachePoller, CacheSnapshot, CacheState, RefreshCache, RefreshOutcome,
    DEFAULT_MIN_INTERVAL,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CacheConfig, Config, ConfigError,
    FilterConfig, ServerConfig, SiteConfig,
};
pub use query::{EpisodeNaming, QueryBuilder, QueryGroup, QueryMode, QuerySet, SceneNaming};
pub use searcher::{
    AcceptanceFilter, BadReleaseFilter, Candidate, CandidateExtractor, FetchError, Fetcher,
    HttpFetcher, IsoHuntProvider, ModeResults, PatternExtractor, RawRow, Rejection,
    ReleaseFilter, SearchResults, SiteUrls, PROVIDER_NAME,
};
pub use show::{Episode, EpisodeStatus, Show};

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Indexing site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Listing and search host (e.g., "https://isohunt.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Host serving .torrent downloads
    #[serde(default = "default_download_url")]
    pub download_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            download_url: default_download_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://isohunt.com".to_string()
}

fn default_download_url() -> String {
    "https://ca.isohunt.com".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    concat!("isohunt-connector/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Largest accepted `cache.min_interval_mins` (one week).
pub const MAX_MIN_INTERVAL_MINS: u64 = 7 * 24 * 60;

/// Latest-listing cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Minimum minutes between two successful polls of the latest listing
    #[serde(default = "default_min_interval")]
    pub min_interval_mins: u64,
    /// Run the background poller
    #[serde(default = "default_poll_enabled")]
    pub poll_enabled: bool,
    /// Seconds between poller wake-ups; each wake-up is a no-op until the
    /// interval above has elapsed
    #[serde(default = "default_poll_tick")]
    pub poll_tick_secs: u64,
}

impl CacheConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_mins.saturating_mul(60))
    }

    pub fn poll_tick(&self) -> Duration {
        Duration::from_secs(self.poll_tick_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            min_interval_mins: default_min_interval(),
            poll_enabled: default_poll_enabled(),
            poll_tick_secs: default_poll_tick(),
        }
    }
}

fn default_min_interval() -> u64 {
    15
}

fn default_poll_enabled() -> bool {
    true
}

fn default_poll_tick() -> u64 {
    60
}

/// Release filtering configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Extra words that disqualify a release, on top of the built-in list
    #[serde(default)]
    pub ignore_words: Vec<String>,
}

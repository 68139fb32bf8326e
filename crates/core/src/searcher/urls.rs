//! Address templates for the indexing site.

use crate::config::SiteConfig;

/// Latest TV torrents, newest first, any age.
const LATEST_PATH: &str = "/torrents/?ihs1=5&iho1=d&iht=3&age=0";

/// Builds every address the connector requests from the site.
///
/// The download location depends on nothing but the torrent identifier, so two
/// candidates with the same identifier always share a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    base_url: String,
    download_url: String,
}

impl SiteUrls {
    pub fn new(base_url: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            download_url: download_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.base_url, &config.download_url)
    }

    /// The "latest listing" page polled by the refresh cache.
    pub fn latest(&self) -> String {
        format!("{}{}", self.base_url, LATEST_PATH)
    }

    /// The listing page for a free-text search.
    pub fn search(&self, query: &str) -> String {
        format!("{}/torrents/?ihq={}", self.base_url, quote_plus(query))
    }

    /// Retrieval address of a torrent. The site ignores the file name, only
    /// the identifier matters.
    pub fn download(&self, identifier: u64) -> String {
        format!(
            "{}/download/{}/{}.torrent",
            self.download_url, identifier, identifier
        )
    }
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

/// Form-style encoding: spaces become `+`, everything outside the unreserved
/// set is percent-encoded.
pub fn quote_plus(query: &str) -> String {
    urlencoding::encode(query).replace("%20", "+")
}

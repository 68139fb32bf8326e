//! IsoHunt provider: runs query groups against the site.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{
    AcceptanceFilter, BadReleaseFilter, Candidate, CandidateExtractor, Fetcher, ModeResults,
    PatternExtractor, ReleaseFilter, SearchResults, SiteUrls,
};
use crate::config::Config;
use crate::metrics::{PAGES_FETCHED, SEARCH_QUERIES};
use crate::query::{QueryBuilder, QueryGroup, QuerySet};
use crate::show::{Episode, Show};

/// Provider name for logging.
pub const PROVIDER_NAME: &str = "IsoHunt";

/// Everything needed to turn a search request into accepted candidates.
pub struct IsoHuntProvider {
    urls: SiteUrls,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn CandidateExtractor>,
    filter: AcceptanceFilter,
    query_builder: QueryBuilder,
}

impl IsoHuntProvider {
    /// Create a provider with the default extractor, release filter and naming.
    pub fn new(urls: SiteUrls, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            extractor: Arc::new(PatternExtractor::new(urls.clone())),
            urls,
            fetcher,
            filter: AcceptanceFilter::default(),
            query_builder: QueryBuilder::new(),
        }
    }

    /// Create a provider from configuration.
    pub fn from_config(config: &Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(SiteUrls::from_config(&config.site), fetcher).with_release_filter(Arc::new(
            BadReleaseFilter::new(&config.filter.ignore_words),
        ))
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn CandidateExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_release_filter(mut self, release_filter: Arc<dyn ReleaseFilter>) -> Self {
        self.filter = AcceptanceFilter::new(release_filter);
        self
    }

    pub fn with_query_builder(mut self, query_builder: QueryBuilder) -> Self {
        self.query_builder = query_builder;
        self
    }

    pub fn name(&self) -> &str {
        PROVIDER_NAME
    }

    pub fn urls(&self) -> &SiteUrls {
        &self.urls
    }

    pub fn query_builder(&self) -> &QueryBuilder {
        &self.query_builder
    }

    /// Fetch a page, recording the outcome.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        let page = self.fetcher.fetch(url).await;
        let outcome = if page.is_some() { "success" } else { "absent" };
        PAGES_FETCHED.with_label_values(&[outcome]).inc();
        page
    }

    /// All readable candidates of a listing page.
    pub fn items_from_data(&self, markup: &str) -> Vec<Candidate> {
        self.extractor.extract(markup)
    }

    pub fn is_acceptable(&self, candidate: &Candidate) -> bool {
        self.filter.is_acceptable(candidate)
    }

    /// The (title, url) pair stored for a candidate.
    pub fn title_and_url(&self, candidate: &Candidate) -> (String, String) {
        (
            candidate.title().to_string(),
            candidate.location().replace("&amp;", "&"),
        )
    }

    /// Run every query of `group`, one at a time, in group order.
    ///
    /// Only acceptable candidates are kept. A query whose page cannot be
    /// fetched ends its mode; the next mode still runs.
    pub async fn search(&self, group: &QueryGroup) -> SearchResults {
        let start = Instant::now();
        let mut modes = Vec::with_capacity(group.sets().len());

        for set in group.sets() {
            modes.push(self.search_mode(set).await);
        }

        let results = SearchResults {
            modes,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            provider = PROVIDER_NAME,
            queries = group.total_queries(),
            results = results.len(),
            duration_ms = results.duration_ms,
            "Search complete"
        );
        results
    }

    async fn search_mode(&self, set: &QuerySet) -> ModeResults {
        let mode = set.mode();
        let mut results = ModeResults::new(mode);

        for query in set.queries() {
            let url = self.urls.search(query);
            debug!(mode = %mode, url = %url, "Search string");
            SEARCH_QUERIES.with_label_values(&[mode.as_str()]).inc();
            results.queries_issued += 1;

            let Some(data) = self.fetch_page(&url).await else {
                debug!(mode = %mode, query = %query, "No page returned, skipping remaining queries");
                results.aborted = true;
                break;
            };

            results.candidates.extend(
                self.items_from_data(&data)
                    .into_iter()
                    .filter(|c| self.is_acceptable(c)),
            );
        }

        results
    }

    /// Search for a single episode of `show`.
    pub async fn find_episode(&self, show: &Show, episode: &Episode) -> SearchResults {
        let group = self.query_builder.episode_group(show, episode);
        self.search(&group).await
    }

    /// Search for every wanted episode of a season.
    pub async fn find_season(&self, show: &Show, season: u32) -> SearchResults {
        let group = self.query_builder.season_queries(show, season);
        if group.is_empty() {
            return SearchResults::default();
        }
        self.search(&group).await
    }
}

impl std::fmt::Debug for IsoHuntProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsoHuntProvider")
            .field("urls", &self.urls)
            .field("fetcher", &"<fetcher>")
            .field("extractor", &self.extractor.name())
            .field("filter", &self.filter)
            .finish()
    }
}

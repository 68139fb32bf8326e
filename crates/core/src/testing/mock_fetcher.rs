//! Mock fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::searcher::Fetcher;

/// A scripted response: any URL containing `pattern` gets `body`.
#[derive(Debug, Clone)]
struct Route {
    pattern: String,
    body: Option<String>,
}

/// Mock implementation of the Fetcher trait.
///
/// Provides controllable behavior for testing:
/// - Return scripted pages per URL fragment
/// - Simulate absent pages (transport failures)
/// - Track requested URLs for assertions
///
/// Clones share state, so a test can keep a handle after giving one to a
/// provider.
///
/// # Example
///
/// ```rust,ignore
/// use isohunt_core::testing::{fixtures, MockFetcher};
///
/// let fetcher = MockFetcher::new();
/// fetcher.set_response("ihq=Lost", fixtures::listing_page(&rows)).await;
/// fetcher.set_absent("ihq=Fringe").await;
///
/// // ... run a search ...
///
/// assert_eq!(fetcher.request_count().await, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    /// Routes checked in insertion order.
    routes: Arc<RwLock<Vec<Route>>>,
    /// Returned when no route matches. `None` by default.
    default_response: Arc<RwLock<Option<String>>>,
    /// Every URL requested, in order.
    requests: Arc<RwLock<Vec<String>>>,
    /// Simulated latency per request.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockFetcher {
    /// Create a mock fetcher that returns no page for any URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for every URL containing `pattern`.
    pub async fn set_response(&self, pattern: &str, body: impl Into<String>) {
        self.routes.write().await.push(Route {
            pattern: pattern.to_string(),
            body: Some(body.into()),
        });
    }

    /// Return no page for every URL containing `pattern`.
    pub async fn set_absent(&self, pattern: &str) {
        self.routes.write().await.push(Route {
            pattern: pattern.to_string(),
            body: None,
        });
    }

    /// Response for URLs no route matches.
    pub async fn set_default_response(&self, body: Option<String>) {
        *self.default_response.write().await = body;
    }

    /// Remove every route.
    pub async fn clear_routes(&self) {
        self.routes.write().await.clear();
    }

    /// Delay every response by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Get recorded request URLs.
    pub async fn recorded_requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    /// Get the number of requests made.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.requests.write().await.push(url.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let routed = self
            .routes
            .read()
            .await
            .iter()
            .find(|r| url.contains(&r.pattern))
            .map(|r| r.body.clone());

        match routed {
            Some(body) => body,
            None => self.default_response.read().await.clone(),
        }
    }
}

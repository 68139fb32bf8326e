//! Acceptance rules for extracted candidates.

use regex_lite::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::Candidate;
use crate::metrics::CANDIDATES_REJECTED;

/// Words that mark a release as something other than the episode itself.
const BAD_RELEASE_WORDS: &[&str] = &[
    "sub(pack|s|bed)",
    "nlsub(bed|s)?",
    "swesub(bed)?",
    "(dir|sample|sub|nfo)fix",
    "sample",
    "(dvd)?extras",
    "dub(bed)?",
];

/// Release-quality check applied to candidate titles.
pub trait ReleaseFilter: Send + Sync {
    fn is_release_acceptable(&self, title: &str) -> bool;
}

/// Rejects titles that contain a known bad word as a separate token.
pub struct BadReleaseFilter {
    patterns: Vec<Regex>,
}

impl BadReleaseFilter {
    /// Built-in words plus the user's ignore words (matched literally).
    pub fn new<S: AsRef<str>>(ignore_words: &[S]) -> Self {
        let builtin = BAD_RELEASE_WORDS.iter().map(|w| w.to_string());
        let extra = ignore_words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .map(regex_lite::escape);

        let patterns = builtin
            .chain(extra)
            .filter_map(|word| Regex::new(&format!(r"(?i)(^|[\W_]){}($|[\W_])", word)).ok())
            .collect();

        Self { patterns }
    }
}

impl Default for BadReleaseFilter {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}

impl ReleaseFilter for BadReleaseFilter {
    fn is_release_acceptable(&self, title: &str) -> bool {
        !self.patterns.iter().any(|p| p.is_match(title))
    }
}

/// Why a candidate was rejected, in rule evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoSeeders,
    EmptyTitle,
    BadRelease,
    NegativeRating,
}

impl Rejection {
    /// Metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::NoSeeders => "no_seeders",
            Rejection::EmptyTitle => "empty_title",
            Rejection::BadRelease => "bad_release",
            Rejection::NegativeRating => "negative_rating",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a candidate is usable at all.
#[derive(Clone)]
pub struct AcceptanceFilter {
    release_filter: Arc<dyn ReleaseFilter>,
}

impl AcceptanceFilter {
    pub fn new(release_filter: Arc<dyn ReleaseFilter>) -> Self {
        Self { release_filter }
    }

    /// First failing rule, if any.
    pub fn check(&self, candidate: &Candidate) -> Result<(), Rejection> {
        if candidate.seeder_count() == 0 {
            return Err(Rejection::NoSeeders);
        }
        if candidate.title().is_empty() {
            return Err(Rejection::EmptyTitle);
        }
        if !self.release_filter.is_release_acceptable(candidate.title()) {
            return Err(Rejection::BadRelease);
        }
        if candidate.is_negatively_rated() {
            return Err(Rejection::NegativeRating);
        }
        Ok(())
    }

    pub fn is_acceptable(&self, candidate: &Candidate) -> bool {
        match self.check(candidate) {
            Ok(()) => true,
            Err(reason) => {
                debug!(
                    title = %candidate.title(),
                    rating = %candidate.rating(),
                    seeders = candidate.seeder_count(),
                    reason = %reason,
                    "Ignoring result"
                );
                CANDIDATES_REJECTED
                    .with_label_values(&[reason.as_str()])
                    .inc();
                false
            }
        }
    }
}

impl Default for AcceptanceFilter {
    fn default() -> Self {
        Self::new(Arc::new(BadReleaseFilter::default()))
    }
}

impl fmt::Debug for AcceptanceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcceptanceFilter")
            .field("release_filter", &"<release_filter>")
            .finish()
    }
}

//! Types for the candidate extraction and search pipeline.

use serde::Serialize;

use super::SiteUrls;
use crate::query::QueryMode;

/// Fields captured from one listing row, before the location is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub title: String,
    pub identifier: u64,
    pub rating: String,
    pub comment_count: u32,
    pub seeder_count: u32,
    pub leecher_count: u32,
}

/// A torrent discovered on a listing page.
///
/// Immutable once built. The location is always derived from the identifier
/// through [`SiteUrls::download`], never set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    title: String,
    identifier: u64,
    location: String,
    rating: String,
    comment_count: u32,
    seeder_count: u32,
    leecher_count: u32,
}

impl Candidate {
    pub fn from_row(row: RawRow, urls: &SiteUrls) -> Self {
        Self {
            location: urls.download(row.identifier),
            title: row.title,
            identifier: row.identifier,
            rating: row.rating,
            comment_count: row.comment_count,
            seeder_count: row.seeder_count,
            leecher_count: row.leecher_count,
        }
    }

    /// Normalized display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site-assigned torrent id.
    pub fn identifier(&self) -> u64 {
        self.identifier
    }

    /// Retrieval address of the .torrent file.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Signed rating token as shown by the site ("+24", "-3", or empty).
    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn comment_count(&self) -> u32 {
        self.comment_count
    }

    pub fn seeder_count(&self) -> u32 {
        self.seeder_count
    }

    pub fn leecher_count(&self) -> u32 {
        self.leecher_count
    }

    /// Only the sign matters, the magnitude is never compared.
    pub fn is_negatively_rated(&self) -> bool {
        self.rating.starts_with('-')
    }
}

/// Accepted candidates for one query mode, in query issuance order.
#[derive(Debug, Clone, Serialize)]
pub struct ModeResults {
    pub mode: QueryMode,
    /// Queries actually sent to the site.
    pub queries_issued: usize,
    /// A fetch returned nothing and the remaining queries of this mode were skipped.
    pub aborted: bool,
    pub candidates: Vec<Candidate>,
}

impl ModeResults {
    pub fn new(mode: QueryMode) -> Self {
        Self {
            mode,
            queries_issued: 0,
            aborted: false,
            candidates: Vec::new(),
        }
    }
}

/// Outcome of running a query group against the site.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub modes: Vec<ModeResults>,
    pub duration_ms: u64,
}

impl SearchResults {
    /// Total accepted candidates across all modes.
    pub fn len(&self) -> usize {
        self.modes.iter().map(|m| m.candidates.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn for_mode(&self, mode: QueryMode) -> Option<&ModeResults> {
        self.modes.iter().find(|m| m.mode == mode)
    }

    /// All candidates, modes in issuance order.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.modes.iter().flat_map(|m| m.candidates.iter())
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.modes.into_iter().flat_map(|m| m.candidates).collect()
    }
}

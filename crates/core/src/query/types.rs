use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of search being run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Whole-season packs.
    Season,
    /// Single episodes.
    Episode,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Season => "season",
            QueryMode::Episode => "episode",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query strings of one mode, in issuance order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "queries", rename_all = "snake_case")]
pub enum QuerySet {
    Season(Vec<String>),
    Episode(Vec<String>),
}

impl QuerySet {
    pub fn mode(&self) -> QueryMode {
        match self {
            QuerySet::Season(_) => QueryMode::Season,
            QuerySet::Episode(_) => QueryMode::Episode,
        }
    }

    pub fn queries(&self) -> &[String] {
        match self {
            QuerySet::Season(q) | QuerySet::Episode(q) => q,
        }
    }
}

/// Every query needed for one search request.
///
/// Season queries, when present, come first. A group with no episode queries
/// is empty: nothing is wanted, so nothing is searched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryGroup {
    sets: Vec<QuerySet>,
}

impl QueryGroup {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(season: Vec<String>, episode: Vec<String>) -> Self {
        if episode.is_empty() {
            return Self::empty();
        }

        let mut sets = Vec::with_capacity(2);
        if !season.is_empty() {
            sets.push(QuerySet::Season(season));
        }
        sets.push(QuerySet::Episode(episode));
        Self { sets }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(|s| s.queries().is_empty())
    }

    pub fn sets(&self) -> &[QuerySet] {
        &self.sets
    }

    /// Queries of `mode`, empty when the mode is absent.
    pub fn queries(&self, mode: QueryMode) -> &[String] {
        self.sets
            .iter()
            .find(|s| s.mode() == mode)
            .map(QuerySet::queries)
            .unwrap_or(&[])
    }

    pub fn total_queries(&self) -> usize {
        self.sets.iter().map(|s| s.queries().len()).sum()
    }
}

//! Candidate extraction from rendered listing pages.
//!
//! The site has no usable API for ratings and comments, so the HTML listing is
//! scraped instead. Every torrent is one `<tr class="hlRow">` row laid out as:
//!
//! ```text
//! <tr class="hlRow" ...>
//!   <td class="row3">TV</td>
//!   <td class="row3" ...>...3.4d</td>
//!   <td class="row3" id="name11">
//!     <a href="/torrent_details/467572511/...?tab=comments" title="+24 rating, 28 comments on torrent">...</a>
//!     <a id="link11" href="/torrent_details/467572511/...?tab=summary"><b>Game.of.Thrones</b>.S03E01.HDTV.x264-2HD.mp4</a>
//!   </td>
//!   <td class="row3" title="1 file">385.94 MB</td>
//!   <td class="row3">45449</td>
//!   <td class="row3">2650</td>
//! </tr>
//! ```

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};
use std::str::FromStr;
use tracing::{debug, trace};

use super::{Candidate, RawRow, SiteUrls};
use crate::metrics::{CANDIDATES_EXTRACTED, ROWS_SKIPPED};

/// One listing row, from its opening tag to the closing `</tr>`.
static ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<tr class="hlRow"[^>]*>(?P<row>.*?)</tr>"#).expect("row pattern compiles")
});

/// Columns inside a row, in the order the site renders them.
static FIELDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?s)(?P<rating>[-+]?\d+) rating, (?P<comments>\d+) comments on torrent"#,
        r#".*?/torrent_details/(?P<id>\d+)/"#,
        r#".*?tab=summary["']>(?P<title>.*?)</a>"#,
        r#".*?<td.*?(?P<seeders>\d+)</td>"#,
        r#".*?<td.*?(?P<leechers>\d+)</td>\s*$"#,
    ))
    .expect("fields pattern compiles")
});

static BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?br\s*/?>").expect("break pattern compiles"));

static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(?:b|strong|em|i)>").expect("emphasis pattern compiles"));

static SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)</?span[^>]*>").expect("span pattern compiles"));

/// Turns a markup document into candidate records.
///
/// Rows that cannot be read are skipped, never reported as errors: listings
/// interleave advertisements and non-torrent rows.
pub trait CandidateExtractor: Send + Sync {
    /// Strategy name for logging.
    fn name(&self) -> &str;

    /// Extract every readable row of `markup`, in document order.
    fn extract(&self, markup: &str) -> Vec<Candidate>;
}

/// Regex-driven extractor for the site's listing table.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    urls: SiteUrls,
}

impl PatternExtractor {
    pub fn new(urls: SiteUrls) -> Self {
        Self { urls }
    }

    fn parse_row(&self, row: &str) -> Option<RawRow> {
        let caps = FIELDS_RE.captures(row)?;

        Some(RawRow {
            title: normalize_title(caps.name("title")?.as_str()),
            identifier: parse_field(&caps, "id")?,
            rating: caps.name("rating")?.as_str().to_string(),
            comment_count: parse_field(&caps, "comments")?,
            seeder_count: parse_field(&caps, "seeders")?,
            leecher_count: parse_field(&caps, "leechers")?,
        })
    }
}

impl CandidateExtractor for PatternExtractor {
    fn name(&self) -> &str {
        "pattern"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for row_caps in ROW_RE.captures_iter(markup) {
            let Some(row) = row_caps.name("row") else {
                continue;
            };

            let Some(raw) = self.parse_row(row.as_str()) else {
                trace!(offset = row.start(), "Skipping unreadable listing row");
                ROWS_SKIPPED.inc();
                continue;
            };

            let candidate = Candidate::from_row(raw, &self.urls);
            debug!(
                title = %candidate.title(),
                url = %candidate.location(),
                comments = candidate.comment_count(),
                rating = %candidate.rating(),
                torrent_id = candidate.identifier(),
                seeders = candidate.seeder_count(),
                leechers = candidate.leecher_count(),
                "Extracted candidate"
            );
            candidates.push(candidate);
        }

        CANDIDATES_EXTRACTED.inc_by(candidates.len() as u64);
        candidates
    }
}

fn parse_field<T: FromStr>(caps: &Captures<'_>, field: &str) -> Option<T> {
    let value = caps.name(field)?.as_str();
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!(field, value, "Skipping row with malformed numeric field");
            None
        }
    }
}

/// Strip listing markup from a raw title.
///
/// Steps run in this order:
/// 1. line breaks become a space (the site sometimes prefixes the category)
/// 2. bold/emphasis tags are dropped (matched search terms are highlighted)
/// 3. span wrappers are dropped
/// 4. underscores become periods (underscored release names are rejected downstream)
///
/// Steps 1-3 repeat until nothing changes, so a tag split around another
/// tag (`<<b>b>`) cannot survive a single pass.
pub fn normalize_title(raw: &str) -> String {
    let mut title = raw.to_string();
    loop {
        let stripped = strip_markup(&title);
        if stripped == title {
            break;
        }
        title = stripped;
    }
    title.replace('_', ".").trim().to_string()
}

fn strip_markup(title: &str) -> String {
    let title = BREAK_RE.replace_all(title, " ");
    let title = EMPHASIS_RE.replace_all(&title, "");
    SPAN_RE.replace_all(&title, "").into_owned()
}

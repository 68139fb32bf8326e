//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`Fetcher`](crate::searcher::Fetcher) and
//! markup fixtures shaped like the site's listing table, so the search and
//! cache paths can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use isohunt_core::testing::{fixtures, MockFetcher};
//!
//! let fetcher = MockFetcher::new();
//! fetcher.set_default_response(Some(fixtures::listing_page(&[
//!     fixtures::listing_row(1, "Show.S01E01.HDTV", "+3", 0, 10, 1),
//! ]))).await;
//! ```

mod mock_fetcher;

pub use mock_fetcher::MockFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::show::{Episode, EpisodeStatus, Show};

    /// One torrent row as rendered by the site.
    ///
    /// `title_html` is inserted verbatim, so highlighting markup such as
    /// `<b>..</b>` can be tested.
    pub fn listing_row(
        identifier: u64,
        title_html: &str,
        rating: &str,
        comments: u32,
        seeders: u32,
        leechers: u32,
    ) -> String {
        format!(
            r#"<tr class="hlRow" onclick="windowlocation=link11.href" onmouseover="rowOver(11)" onmouseout="rowOut(11,'#cad9ea')">
    <td class="row3">TV</td>
    <td class="row3" id="row_6_11">
        <a onclick="servOC(11,'/torrent_details/{id}/search','',ihTri11)">
            <img class="tog" id="ihTri11" src="https://isohunt.com/img/serp-toggle-up.gif" title="Toggle torrent details below" height="19" width="19">
        </a>3.4d
    </td>
    <td class="row3" id="name11">
        <a href="/torrent_details/{id}/search?tab=comments" style="float:right; color:green; font-weight:bold" title="{rating} rating, {comments} comments on torrent">
            {rating}<img src="/img/serp_icon_star.gif" alt="rating" height="12" width="12">
            {comments}<img src="/img/serp_icon_bubble.gif" alt="comments" height="10" width="10">
        </a>
        <a id="link11" href="/torrent_details/{id}/search?tab=summary">{title}</a>
    </td>
    <td class="row3" title="1 file">385.94 MB</td>
    <td class="row3">{seeders}</td>
    <td class="row3">{leechers}</td>
</tr>"#,
            id = identifier,
            title = title_html,
            rating = rating,
            comments = comments,
            seeders = seeders,
            leechers = leechers,
        )
    }

    /// A sponsored row with no rating, like the ones interleaved in listings.
    pub fn ad_row() -> String {
        r#"<tr class="hlRow">
    <td class="row3">Ad</td>
    <td class="row3"><a href="/torrent_details/999/sponsored?tab=summary">Download Fast!</a></td>
    <td class="row3">1</td>
    <td class="row3">2</td>
</tr>"#
            .to_string()
    }

    /// A full listing page wrapping `rows` in the results table.
    pub fn listing_page(rows: &[String]) -> String {
        format!(
            "<html><head><title>isoHunt</title></head><body>\n<table id=\"serps\">\n<tr><th>Category</th><th>Age</th><th>Torrent</th><th>Size</th><th>S</th><th>L</th></tr>\n{}\n</table>\n</body></html>",
            rows.join("\n")
        )
    }

    /// A numbered show with one season whose episodes have `statuses`.
    pub fn show_with_season(name: &str, season: u32, statuses: &[EpisodeStatus]) -> Show {
        Show::new(name).with_episodes(
            statuses
                .iter()
                .enumerate()
                .map(|(i, status)| Episode::new(season, i as u32 + 1, *status))
                .collect(),
        )
    }
}

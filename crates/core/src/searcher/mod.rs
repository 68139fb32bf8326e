//! Candidate discovery on the IsoHunt listing pages.
//!
//! Pages are fetched through a [`Fetcher`], turned into [`Candidate`]s by a
//! [`CandidateExtractor`] and screened by an [`AcceptanceFilter`].

mod extractor;
mod fetcher;
mod filter;
mod provider;
mod types;
mod urls;

pub use extractor::{normalize_title, CandidateExtractor, PatternExtractor};
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use filter::{AcceptanceFilter, BadReleaseFilter, Rejection, ReleaseFilter};
pub use provider::{IsoHuntProvider, PROVIDER_NAME};
pub use types::*;
pub use urls::{quote_plus, SiteUrls};

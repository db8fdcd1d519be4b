//! Site crawling
//!
//! This module turns a seed URL into a cached snapshot's raw material:
//! - Link discovery bounded to the seed's host and path prefix
//! - Silent per-page fetching with visible-text cleaning
//! - Bounded concurrent fan-out over the discovered URL set

mod coordinator;
mod discovery;
mod extract;
mod fetcher;

pub use coordinator::{SiteCrawler, SnapshotSource};
pub use discovery::discover_links;
pub use extract::{collapse_whitespace, extract_visible_text};
pub use fetcher::{build_http_client, fetch_page, fetch_seed_html};

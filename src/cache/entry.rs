//! Snapshot data model and TTL bookkeeping
//!
//! A crawl produces a [`PageSet`], the unit of caching: it is written and
//! replaced wholesale, never patched. [`CacheEntry`] pairs a page set with
//! the timestamp it was stored at so staleness can be evaluated at read
//! time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One crawled page: its URL and cleaned visible text
///
/// `content` has scripts, styles, nav, and footer stripped and whitespace
/// collapsed to single newlines. Provenance markers are applied by the
/// rendering layers, not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub content: String,
}

/// The full snapshot of crawled pages, cached as one unit
///
/// One entry per successfully fetched URL; the crawler dedupes by URL
/// before fetching, so duplicates cannot occur. Order is not significant —
/// retrieval re-sorts by relevance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total character count across all page contents
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.content.chars().count()).sum()
    }

    /// Renders the whole snapshot as one string with per-page provenance
    /// markers, for diagnostics and snapshot dumps
    pub fn combined_text(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            out.push_str(&format!("--- Source: {} ---\n{}\n", page.url, page.content));
        }
        out
    }
}

/// A cached snapshot together with the time it was stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: PageSet,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates an entry timestamped now
    pub fn new(payload: PageSet) -> Self {
        Self {
            payload,
            stored_at: Utc::now(),
        }
    }

    /// Checks whether the entry has outlived the given TTL
    ///
    /// Evaluated at read time; expired entries are never served, they are
    /// passively replaced by the next write.
    pub fn is_stale(&self, ttl_seconds: u64) -> bool {
        self.age() > Duration::seconds(ttl_seconds as i64)
    }

    /// Returns how long ago the entry was stored
    pub fn age(&self) -> Duration {
        Utc::now() - self.stored_at
    }
}

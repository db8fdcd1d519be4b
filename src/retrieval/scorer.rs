//! Per-page relevance scoring
//!
//! Score = coverage × coverage-weight + frequency + header-bonus-weight ×
//! header hits, where coverage is the count of distinct matched keywords,
//! frequency the sum of occurrence counts, and a header hit is a matched
//! keyword that also appears within the first N characters of the page.
//! The coverage weight dominates so that a page touching many distinct
//! query concepts outranks a page repeating one concept. Zero-score pages
//! are excluded entirely.

use crate::cache::{Page, PageSet};
use crate::config::RetrievalConfig;

/// A page with its relevance score, transient to one retrieval call
#[derive(Debug)]
pub struct ScoredPage<'a> {
    pub page: &'a Page,
    pub score: u64,
}

/// Scores one page against the extracted keywords
pub fn score_page(page: &Page, keywords: &[String], config: &RetrievalConfig) -> u64 {
    // ASCII keywords are lowercased at extraction; match case-insensitively
    let haystack = page.content.to_lowercase();
    let header: String = haystack.chars().take(config.header_window_chars).collect();

    let mut coverage = 0u64;
    let mut frequency = 0u64;
    let mut header_hits = 0u64;

    for keyword in keywords {
        let occurrences = haystack.matches(keyword.as_str()).count() as u64;
        if occurrences == 0 {
            continue;
        }
        coverage += 1;
        frequency += occurrences;
        if header.contains(keyword.as_str()) {
            header_hits += 1;
        }
    }

    coverage * config.coverage_weight + frequency + header_hits * config.header_bonus_weight
}

/// Ranks the pages of a snapshot against the keywords
///
/// Returns at most `top_k` pages with non-zero scores, sorted descending.
/// The sort is stable: equal-score pages keep their snapshot order.
pub fn rank_pages<'a>(
    pages: &'a PageSet,
    keywords: &[String],
    config: &RetrievalConfig,
) -> Vec<ScoredPage<'a>> {
    let mut scored: Vec<ScoredPage<'a>> = pages
        .pages()
        .iter()
        .map(|page| ScoredPage {
            page,
            score: score_page(page, keywords, config),
        })
        .filter(|scored| scored.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(config.top_k);
    scored
}

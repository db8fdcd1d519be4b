//! Query-time relevance scoring and context assembly
//!
//! Given a question and the cached snapshot, this module:
//! 1. Extracts keywords (ASCII words plus CJK unigrams/bigrams)
//! 2. Scores every page (coverage-dominant formula)
//! 3. Assembles the top-ranked pages into a character-budgeted context
//!    string with provenance markers
//!
//! The scorer borrows the snapshot read-only; nothing here is persisted.

mod context;
mod keywords;
mod scorer;

pub use context::{assemble_context, TRUNCATION_MARKER};
pub use keywords::{extract_keywords, is_cjk};
pub use scorer::{rank_pages, score_page, ScoredPage};

use crate::cache::PageSet;
use crate::config::RetrievalConfig;

/// Selects and bounds the context for a question
///
/// Returns an empty string when no page scores above zero.
pub fn select_context(question: &str, pages: &PageSet, config: &RetrievalConfig) -> String {
    let keywords = extract_keywords(question);
    let ranked = rank_pages(pages, &keywords, config);
    tracing::debug!(
        keywords = keywords.len(),
        matched_pages = ranked.len(),
        "Scored snapshot against question"
    );
    assemble_context(&ranked, config.char_budget)
}

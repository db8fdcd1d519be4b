//! Bounded context assembly
//!
//! Concatenates ranked pages as provenance-marked blocks until the
//! character budget is reached. The block that would overflow the budget
//! is truncated into the remaining room with an explicit marker; pages
//! ranked below it are dropped, never truncated-then-continued.

use crate::retrieval::scorer::ScoredPage;

/// Marker appended when a page is cut to fit the budget
pub const TRUNCATION_MARKER: &str = "...(truncated)";

/// Assembles ranked pages into a context string within `char_budget`
///
/// Budget and lengths are counted in Unicode scalars, not bytes — CJK
/// content would otherwise get a third of the intended room.
pub fn assemble_context(ranked: &[ScoredPage<'_>], char_budget: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;

    for scored in ranked {
        let block = format!(
            "--- Source: {} (Relevance: {}) ---\n{}\n",
            scored.page.url, scored.score, scored.page.content
        );
        let block_len = block.chars().count();

        if used + block_len <= char_budget {
            out.push_str(&block);
            used += block_len;
            continue;
        }

        let remaining = char_budget - used;
        let marker_len = TRUNCATION_MARKER.chars().count();
        if remaining > marker_len {
            out.extend(block.chars().take(remaining - marker_len));
            out.push_str(TRUNCATION_MARKER);
        }
        break;
    }

    out
}

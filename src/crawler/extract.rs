//! Visible-text extraction from HTML
//!
//! Turns a raw HTML document into the cleaned text that gets cached and
//! scored: script, style, nav, and footer subtrees are dropped, the
//! remaining text nodes are collected, and whitespace is collapsed so each
//! line of content is separated by a single newline.

use scraper::{Html, Node};

/// Elements whose text is never page content
const SKIP_TAGS: [&str; 4] = ["script", "style", "nav", "footer"];

/// Extracts the visible text of an HTML document
///
/// # Arguments
///
/// * `html` - The raw HTML to clean
///
/// # Returns
///
/// Cleaned text with whitespace runs collapsed to single spaces and blank
/// lines removed; empty string if the document has no visible text.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut segments: Vec<String> = Vec::new();

    for node in document.tree.root().descendants() {
        if let Node::Text(text) = node.value() {
            let skipped = node.ancestors().any(|ancestor| match ancestor.value() {
                Node::Element(element) => SKIP_TAGS.contains(&element.name()),
                _ => false,
            });
            if !skipped {
                segments.push(text.to_string());
            }
        }
    }

    collapse_whitespace(&segments.join("\n"))
}

/// Collapses whitespace runs to single spaces and drops blank lines
pub fn collapse_whitespace(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

//! Same-origin link discovery
//!
//! Extracts the set of crawlable URLs from a page's anchors. A URL is kept
//! only if it shares the seed's host, starts with the literal seed-URL
//! string (which pins the crawl to a language/path subtree such as `/zh`),
//! and uses http or https. Fragments are stripped before insertion since
//! fragment-only variants are not distinct pages.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Discovers same-origin, same-prefix links in an HTML document
///
/// # Arguments
///
/// * `base_url` - The seed URL; host and literal prefix bound the result
/// * `html` - The HTML document to scan
///
/// # Returns
///
/// A set of absolute, fragment-free URL strings. Malformed hrefs are
/// silently skipped.
pub fn discover_links(base_url: &Url, html: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(resolved) = resolve_anchor(href, base_url) {
                links.insert(resolved);
            }
        }
    }

    links
}

/// Resolves an anchor href against the base URL and applies the retention
/// rules; returns None for anything that should not be crawled
fn resolve_anchor(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut resolved = base_url.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    if resolved.host_str() != base_url.host_str() {
        return None;
    }

    resolved.set_fragment(None);
    let resolved = resolved.to_string();

    // Literal prefix match keeps the crawl inside the seed's subtree
    if !resolved.starts_with(base_url.as_str()) {
        return None;
    }

    Some(resolved)
}

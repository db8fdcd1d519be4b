//! HTTP fetching
//!
//! Two fetch paths with different failure contracts:
//! - [`fetch_seed_html`] reports errors, because without the seed page
//!   there is no link set to expand from and the crawl must stop.
//! - [`fetch_page`] fails silently to `None`, because one page's timeout or
//!   bad encoding must never abort the rest of the fan-out.

use crate::cache::Page;
use crate::crawler::extract::extract_visible_text;
use crate::LanternError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Builds the HTTP client shared by all fetches in a crawl
///
/// Uses a browser-like user agent (some event sites block unlabeled bots),
/// the configured per-request timeout, and compressed transfer.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the seed page's raw HTML
///
/// # Returns
///
/// * `Ok(String)` - The raw HTML body
/// * `Err(LanternError::SeedUnreachable)` - Network failure or non-success
///   status; distinct from a normal empty result so the caller can keep the
///   previous snapshot
pub async fn fetch_seed_html(client: &Client, url: &str) -> Result<String, LanternError> {
    let seed_error = |reason: String| LanternError::SeedUnreachable {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| seed_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(seed_error(format!("HTTP {}", status.as_u16())));
    }

    response.text().await.map_err(|e| seed_error(e.to_string()))
}

/// Fetches one page and returns its cleaned text
///
/// Any failure — non-200 status, timeout, TLS error, undecodable body — is
/// logged and converted to `None`. Pages whose cleaned text is empty are
/// also dropped.
pub async fn fetch_page(client: &Client, url: &str) -> Option<Page> {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Fetch failed for {}: {}", url, e);
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        tracing::debug!(
            "Skipping {} (HTTP {})",
            url,
            response.status().as_u16()
        );
        return None;
    }

    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Failed to read body of {}: {}", url, e);
            return None;
        }
    };

    let content = extract_visible_text(&body);
    if content.is_empty() {
        tracing::debug!("No visible text at {}", url);
        return None;
    }

    Some(Page {
        url: url.to_string(),
        content,
    })
}

//! Crawl coordination
//!
//! [`SiteCrawler`] turns a seed URL into a [`PageSet`]:
//! 1. Fetch the seed page's raw HTML (failure here fails the crawl)
//! 2. Discover same-origin links and union the seed URL itself
//! 3. Fan out a bounded worker pool over the URL set
//! 4. Collect non-empty pages in completion order
//!
//! The concurrency bound is a fixed worker-pool size — it caps socket usage
//! and keeps the crawl from overwhelming the target site. A single URL's
//! failure never fails the crawl.

use crate::cache::{Page, PageSet};
use crate::config::SiteConfig;
use crate::crawler::discovery::discover_links;
use crate::crawler::fetcher::{build_http_client, fetch_page, fetch_seed_html};
use crate::LanternError;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Anything that can produce a fresh site snapshot
///
/// The tiered cache and the refresh scheduler depend on this seam rather
/// than on [`SiteCrawler`] directly, so tests can inject fakes.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Produces a snapshot of the site
    ///
    /// Fails only if the seed page is unreachable or the aggregate result
    /// set is empty; individual page failures are absorbed.
    async fn snapshot(&self) -> crate::Result<PageSet>;
}

/// Crawler for one seed URL and its subtree
pub struct SiteCrawler {
    client: Client,
    seed_url: Url,
    concurrency: usize,
}

impl SiteCrawler {
    /// Creates a crawler from the site configuration
    pub fn new(config: &SiteConfig) -> crate::Result<Self> {
        let seed_url = Url::parse(&config.seed_url)?;
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.fetch_timeout_seconds),
        )?;

        Ok(Self {
            client,
            seed_url,
            concurrency: config.fetch_concurrency,
        })
    }

    /// Crawls the site and returns the collected page set
    pub async fn crawl(&self) -> crate::Result<PageSet> {
        let seed = self.seed_url.as_str();
        let started = std::time::Instant::now();
        tracing::info!("Starting crawl from {}", seed);

        let seed_html = fetch_seed_html(&self.client, seed).await?;

        let mut urls = discover_links(&self.seed_url, &seed_html);
        urls.insert(seed.to_string());
        tracing::info!("Discovered {} pages to fetch", urls.len());

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        for url in urls {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return None,
                };
                fetch_page(&client, &url).await
            });
        }

        let mut pages: Vec<Page> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(page)) => pages.push(page),
                Ok(None) => {}
                Err(e) => tracing::warn!("Fetch task failed to complete: {}", e),
            }
        }

        if pages.is_empty() {
            return Err(LanternError::EmptySnapshot {
                url: seed.to_string(),
            });
        }

        let pages = PageSet::new(pages);
        tracing::info!(
            "Crawl complete: {} pages, {} chars in {:?}",
            pages.len(),
            pages.total_chars(),
            started.elapsed()
        );
        Ok(pages)
    }
}

#[async_trait]
impl SnapshotSource for SiteCrawler {
    async fn snapshot(&self) -> crate::Result<PageSet> {
        self.crawl().await
    }
}

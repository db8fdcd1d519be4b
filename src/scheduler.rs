//! Background snapshot refresh
//!
//! Runs the crawl-and-store job on a fixed interval, independent of
//! request handling. At startup, if neither cache tier holds a usable
//! entry, one immediate warm-up run precedes the periodic schedule — the
//! local copy never survives a restart, so a fresh process has nothing
//! until either the warm-up or the first request-triggered miss. Warm-up
//! and periodic runs execute sequentially on the same task, so they cannot
//! overlap.
//!
//! A failed or empty run logs and leaves the existing cache entry
//! untouched; the interval loop always continues.

use crate::cache::{SharedStore, TieredCache};
use crate::crawler::SnapshotSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Periodic snapshot refresher
pub struct RefreshScheduler<S, C>
where
    S: SharedStore,
    C: SnapshotSource,
{
    cache: Arc<TieredCache<S, C>>,
    source: Arc<C>,
    interval: Duration,
    started: AtomicBool,
}

impl<S, C> RefreshScheduler<S, C>
where
    S: SharedStore + 'static,
    C: SnapshotSource + 'static,
{
    pub fn new(cache: Arc<TieredCache<S, C>>, source: Arc<C>, interval: Duration) -> Self {
        Self {
            cache,
            source,
            interval,
            started: AtomicBool::new(false),
        }
    }

    /// Spawns the refresh loop; idempotent
    ///
    /// The caller owns the cancellation token and cancels it at shutdown.
    ///
    /// # Returns
    ///
    /// * `true` - The loop was started by this call
    /// * `false` - A previous call already started it
    pub fn start(self: &Arc<Self>, cancel: CancellationToken) -> bool {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Refresh scheduler already started, ignoring");
            return false;
        }

        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            scheduler.run(cancel).await;
        });
        true
    }

    /// Drives the warm-up check and the interval loop until cancellation
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!("Refresh scheduler running every {:?}", self.interval);

        if !self.cache.is_warm().await {
            tracing::info!("No usable cache entry at startup, running warm-up refresh");
            self.refresh_once().await;
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // An interval's first tick completes immediately; consume it so the
        // first scheduled run happens one full interval from now.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                _ = cancel.cancelled() => {
                    tracing::info!("Refresh scheduler stopped");
                    break;
                }
            }
        }
    }

    /// Runs one crawl-and-store job
    ///
    /// An error or an empty result keeps the previous snapshot.
    pub async fn refresh_once(&self) {
        tracing::info!("Starting scheduled snapshot refresh");
        match self.source.snapshot().await {
            Ok(pages) if !pages.is_empty() => {
                tracing::info!(
                    pages = pages.len(),
                    chars = pages.total_chars(),
                    "Refresh stored a new snapshot"
                );
                self.cache.set(pages).await;
            }
            Ok(_) => {
                tracing::warn!("Refresh produced no pages, keeping previous snapshot");
            }
            Err(e) => {
                tracing::warn!("Refresh failed, keeping previous snapshot: {}", e);
            }
        }
    }
}

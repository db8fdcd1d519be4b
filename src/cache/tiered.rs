//! Two-tier snapshot cache
//!
//! Read order, first success wins:
//! 1. Shared store, when reachable and holding a non-expired entry. A hit
//!    also rewarms the process-local copy so the next shared-store outage
//!    degrades gracefully.
//! 2. Process-local copy, when within TTL.
//! 3. Live crawl, writing the result to the local copy (always) and the
//!    shared store (best-effort).
//!
//! A read never surfaces an error to its caller because the shared store is
//! down; the only caller-visible failure is an empty page set after all
//! three steps, including a live crawl attempt, came up empty.

use crate::cache::{CacheEntry, PageSet, SharedStore};
use crate::crawler::SnapshotSource;
use std::sync::{Arc, RwLock};

/// Tiered cache owning the canonical snapshot for the process
///
/// The local copy is a single `(payload, stored_at)` pair behind one lock,
/// so a reader can never observe a new payload with a stale timestamp or
/// vice versa. The shared store is external and may have concurrent
/// writers; every write fully replaces the key.
pub struct TieredCache<S, C>
where
    S: SharedStore,
    C: SnapshotSource,
{
    store: Arc<S>,
    source: Arc<C>,
    key: String,
    ttl_seconds: u64,
    local: RwLock<Option<CacheEntry>>,
}

impl<S, C> TieredCache<S, C>
where
    S: SharedStore,
    C: SnapshotSource,
{
    pub fn new(store: Arc<S>, source: Arc<C>, key: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            store,
            source,
            key: key.into(),
            ttl_seconds,
            local: RwLock::new(None),
        }
    }

    /// Returns the cached snapshot, crawling live on a full miss
    ///
    /// Returns an empty [`PageSet`] only when no tier holds content and the
    /// live crawl also failed or came back empty.
    pub async fn get(&self) -> PageSet {
        // Tier 1: shared store
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => match serde_json::from_str::<CacheEntry>(&raw) {
                Ok(entry) if !entry.is_stale(self.ttl_seconds) => {
                    tracing::debug!(
                        pages = entry.payload.len(),
                        "Snapshot hit from shared store"
                    );
                    self.write_local(entry.clone());
                    return entry.payload;
                }
                Ok(_) => {
                    tracing::debug!("Shared store entry expired, falling through");
                }
                Err(e) => {
                    tracing::warn!("Discarding undecodable shared store entry: {}", e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Shared store unreachable, degrading to local copy: {}", e);
            }
        }

        // Tier 2: process-local copy
        if let Some(entry) = self.fresh_local() {
            tracing::debug!(pages = entry.payload.len(), "Snapshot hit from local copy");
            return entry.payload;
        }

        // Tier 3: live crawl
        tracing::info!("Snapshot miss on both tiers, crawling live");
        match self.source.snapshot().await {
            Ok(pages) if !pages.is_empty() => {
                self.set(pages.clone()).await;
                pages
            }
            Ok(_) => {
                tracing::warn!("Live crawl returned no pages");
                PageSet::default()
            }
            Err(e) => {
                tracing::warn!("Live crawl failed: {}", e);
                PageSet::default()
            }
        }
    }

    /// Stores a snapshot in both tiers
    ///
    /// The local copy is always written; the shared store write is
    /// best-effort and a failure is logged, never returned. Idempotent:
    /// each call fully replaces the previous entry.
    pub async fn set(&self, pages: PageSet) {
        let entry = CacheEntry::new(pages);
        self.write_local(entry.clone());

        match serde_json::to_string(&entry) {
            Ok(raw) => {
                if let Err(e) = self.store.set(&self.key, &raw).await {
                    tracing::warn!("Shared store write failed, local copy only: {}", e);
                } else if let Err(e) = self.store.expire(&self.key, self.ttl_seconds).await {
                    tracing::warn!("Shared store expire failed: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to encode snapshot for shared store: {}", e);
            }
        }
    }

    /// Checks whether either tier currently holds a usable entry
    ///
    /// Used by the refresh scheduler to decide whether a startup warm-up
    /// run is needed. Never triggers a crawl.
    pub async fn is_warm(&self) -> bool {
        if self.fresh_local().is_some() {
            return true;
        }
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => match serde_json::from_str::<CacheEntry>(&raw) {
                Ok(entry) => !entry.is_stale(self.ttl_seconds),
                Err(_) => false,
            },
            _ => false,
        }
    }

    /// Returns the local entry if present and within TTL
    fn fresh_local(&self) -> Option<CacheEntry> {
        let guard = self.local.read().unwrap_or_else(|poisoned| {
            // A writer panicking mid-store cannot leave a torn entry; the
            // pair is swapped in as one value.
            poisoned.into_inner()
        });
        match guard.as_ref() {
            Some(entry) if !entry.is_stale(self.ttl_seconds) => Some(entry.clone()),
            _ => None,
        }
    }

    fn write_local(&self, entry: CacheEntry) {
        let mut guard = self
            .local
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryStore, Page, StoreError, StoreResult};
    use crate::{LanternError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Snapshot source that serves fixed pages and counts invocations
    struct FakeSource {
        pages: PageSet,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(pages: PageSet) -> Self {
            Self {
                pages,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SnapshotSource for FakeSource {
        async fn snapshot(&self) -> Result<PageSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.pages.is_empty() {
                return Err(LanternError::EmptySnapshot {
                    url: "https://event.example.com/zh".to_string(),
                });
            }
            Ok(self.pages.clone())
        }
    }

    /// Shared store that can be switched into a failing state mid-test
    struct FlakyStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                failing: AtomicBool::new(false),
            }
        }

        fn go_dark(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }

        fn check(&self) -> StoreResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                Err(StoreError::Unavailable("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl SharedStore for FlakyStore {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.check()?;
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            self.check()?;
            self.inner.set(key, value).await
        }

        async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()> {
            self.check()?;
            self.inner.expire(key, ttl_seconds).await
        }

        async fn delete(&self, key: &str) -> StoreResult<()> {
            self.check()?;
            self.inner.delete(key).await
        }
    }

    fn sample_pages() -> PageSet {
        PageSet::new(vec![Page {
            url: "https://event.example.com/zh".to_string(),
            content: "南瓜怪快閃 時間 10/26".to_string(),
        }])
    }

    fn cache_with(
        store: Arc<FlakyStore>,
        source: Arc<FakeSource>,
    ) -> TieredCache<FlakyStore, FakeSource> {
        TieredCache::new(store, source, "site_snapshot", 3600)
    }

    #[tokio::test]
    async fn test_set_then_get_is_idempotent_without_crawling() {
        let store = Arc::new(FlakyStore::new());
        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = cache_with(store, Arc::clone(&source));

        cache.set(sample_pages()).await;
        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shared_store_hit_bypasses_crawler() {
        let store = Arc::new(FlakyStore::new());
        let entry = CacheEntry::new(sample_pages());
        store
            .set("site_snapshot", &serde_json::to_string(&entry).unwrap())
            .await
            .unwrap();

        // A freshly constructed cache has no local copy yet
        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = cache_with(store, Arc::clone(&source));

        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shared_store_hit_rewarms_local_copy() {
        let store = Arc::new(FlakyStore::new());
        let entry = CacheEntry::new(sample_pages());
        store
            .set("site_snapshot", &serde_json::to_string(&entry).unwrap())
            .await
            .unwrap();

        let source = Arc::new(FakeSource::new(PageSet::default()));
        let cache = cache_with(Arc::clone(&store), Arc::clone(&source));

        // First read warms the local copy from the shared store
        assert_eq!(cache.get().await, sample_pages());

        // Shared store outage: the local copy must carry the read
        store.go_dark();
        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_full_miss_crawls_once_and_fills_both_tiers() {
        let store = Arc::new(FlakyStore::new());
        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = cache_with(Arc::clone(&store), Arc::clone(&source));

        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 1);

        // Both tiers readable afterward, no further crawl
        let raw = store.get("site_snapshot").await.unwrap().unwrap();
        let stored: CacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.payload, sample_pages());

        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_falls_through_to_crawl_without_raising() {
        let store = Arc::new(FlakyStore::new());
        store.go_dark();
        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = cache_with(store, Arc::clone(&source));

        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_total_unavailability_returns_empty_pageset() {
        let store = Arc::new(FlakyStore::new());
        store.go_dark();
        let source = Arc::new(FakeSource::new(PageSet::default()));
        let cache = cache_with(store, Arc::clone(&source));

        assert!(cache.get().await.is_empty());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_local_copy_is_not_served() {
        let store = Arc::new(FlakyStore::new());
        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = TieredCache::new(
            Arc::clone(&store),
            Arc::clone(&source),
            "site_snapshot",
            3600,
        );

        // Plant an expired local entry directly
        let mut entry = CacheEntry::new(sample_pages());
        entry.stored_at = chrono::Utc::now() - chrono::Duration::seconds(7200);
        cache.write_local(entry);
        store.go_dark();

        // Expired local entry triggers fetch-on-miss instead of being served
        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_shared_entry_falls_through() {
        let store = Arc::new(FlakyStore::new());
        let mut entry = CacheEntry::new(sample_pages());
        entry.stored_at = chrono::Utc::now() - chrono::Duration::seconds(7200);
        store
            .set("site_snapshot", &serde_json::to_string(&entry).unwrap())
            .await
            .unwrap();

        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = cache_with(store, Arc::clone(&source));

        assert_eq!(cache.get().await, sample_pages());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_is_warm_reflects_tiers() {
        let store = Arc::new(FlakyStore::new());
        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = cache_with(store, source);

        assert!(!cache.is_warm().await);
        cache.set(sample_pages()).await;
        assert!(cache.is_warm().await);
    }

    #[tokio::test]
    async fn test_is_warm_false_when_store_dark_and_local_empty() {
        let store = Arc::new(FlakyStore::new());
        store.go_dark();
        let source = Arc::new(FakeSource::new(sample_pages()));
        let cache = cache_with(store, Arc::clone(&source));

        assert!(!cache.is_warm().await);
        assert_eq!(source.call_count(), 0);
    }
}

//! Shared store interface and the in-process implementation
//!
//! The shared store is an external, independently-synchronized key/value
//! service (a Redis-shaped surface: GET/SET/EXPIRE/DELETE). The pipeline
//! never assumes exclusive access to it and treats every failure as "store
//! unavailable" rather than propagating it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur during shared store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation failed: {0}")]
    Operation(String),
}

/// Result type for shared store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for shared store backends
///
/// Implementations must be safe to call from concurrent tasks. Callers
/// (the tiered cache) catch every error and degrade silently, so an
/// implementation should report failures honestly rather than retry
/// internally.
#[async_trait]
pub trait SharedStore: Send + Sync {
    /// Gets the value stored under `key`, if present and not expired
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any existing value
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Sets a time-to-live on `key`; the key disappears after `ttl_seconds`
    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()>;

    /// Removes `key` if present
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

/// In-process shared store
///
/// Backs single-node deployments and tests. Honors EXPIRE by checking the
/// deadline lazily on read, the same passive-expiry model the tiered cache
/// assumes of networked stores.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SharedStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(stored) if stored.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(stored) => Ok(Some(stored.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        if let Some(stored) = entries.get_mut(key) {
            stored.expires_at = Some(Instant::now() + Duration::from_secs(ttl_seconds));
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }
}

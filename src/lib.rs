//! Lantern: a freshness-bounded site snapshot and retrieval pipeline
//!
//! This crate keeps a queryable snapshot of a promotional event website
//! available with low latency. It crawls the site concurrently, caches the
//! page set in two tiers (a shared store plus a process-local fallback)
//! under a TTL, refreshes the snapshot on a background schedule, and at
//! query time ranks pages against a question to assemble a bounded context
//! string for a language model.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod engine;
pub mod retrieval;
pub mod scheduler;

use thiserror::Error;

/// Main error type for Lantern operations
#[derive(Debug, Error)]
pub enum LanternError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed page unreachable: {url}: {reason}")]
    SeedUnreachable { url: String, reason: String },

    #[error("Crawl of {url} produced no pages")]
    EmptySnapshot { url: String },

    #[error("Shared store error: {0}")]
    Store(#[from] cache::StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Lantern operations
pub type Result<T> = std::result::Result<T, LanternError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{CacheEntry, MemoryStore, Page, PageSet, SharedStore, TieredCache};
pub use config::Config;
pub use crawler::{SiteCrawler, SnapshotSource};
pub use engine::{GuideEngine, RetrievedContext};
pub use retrieval::select_context;
pub use scheduler::RefreshScheduler;

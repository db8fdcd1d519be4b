//! Configuration module for Lantern
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All values the pipeline consumes are plain scalars: seed URL,
//! TTL, refresh interval, worker-pool size, char budget, top-K, and the
//! scoring weights.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CacheConfig, Config, RetrievalConfig, SchedulerConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

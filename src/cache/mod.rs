//! Tiered snapshot caching
//!
//! This module owns the canonical page snapshot for the process:
//! - Data model: [`Page`], [`PageSet`], [`CacheEntry`]
//! - Shared store interface: [`SharedStore`] with the in-process
//!   [`MemoryStore`] implementation
//! - The read/write chain: [`TieredCache`]

mod entry;
mod store;
mod tiered;

pub use entry::{CacheEntry, Page, PageSet};
pub use store::{MemoryStore, SharedStore, StoreError, StoreResult};
pub use tiered::TieredCache;

use serde::Deserialize;

/// Main configuration structure for Lantern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// Target site and fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Seed URL; its host and path prefix bound the crawl
    /// (e.g. "https://event.example.com/zh" restricts to the /zh subtree)
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// User-Agent header sent with every request. Defaults to a browser-like
    /// string; some event sites block unlabeled bots.
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "fetch-timeout-seconds", default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,

    /// Size of the worker pool fanning out over discovered pages
    #[serde(rename = "fetch-concurrency", default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

/// Tiered cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of a cached snapshot before it is treated as stale.
    /// Governs both the shared store and the process-local copy.
    #[serde(rename = "ttl-seconds", default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Key under which the snapshot lives in the shared store
    #[serde(rename = "store-key", default = "default_store_key")]
    pub store_key: String,
}

/// Background refresh configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Minutes between scheduled snapshot refreshes
    #[serde(
        rename = "refresh-interval-minutes",
        default = "default_refresh_interval"
    )]
    pub refresh_interval_minutes: u64,
}

/// Relevance scoring and context assembly configuration
///
/// The weights are empirical tuning; the invariant that matters is that
/// coverage dominates frequency so a page touching many distinct query
/// concepts outranks a page repeating one concept.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum character length of the assembled context
    #[serde(rename = "char-budget", default = "default_char_budget")]
    pub char_budget: usize,

    /// Number of top-ranked pages considered for assembly
    #[serde(rename = "top-k", default = "default_top_k")]
    pub top_k: usize,

    /// Multiplier applied to the count of distinct matched keywords
    #[serde(rename = "coverage-weight", default = "default_coverage_weight")]
    pub coverage_weight: u64,

    /// Multiplier applied to keywords matched within the header window
    #[serde(rename = "header-bonus-weight", default = "default_header_bonus")]
    pub header_bonus_weight: u64,

    /// Size of the header window, in characters from the start of a page
    #[serde(rename = "header-window-chars", default = "default_header_window")]
    pub header_window_chars: usize,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_fetch_timeout() -> u64 {
    8
}

fn default_fetch_concurrency() -> usize {
    10
}

fn default_ttl_seconds() -> u64 {
    3600
}

fn default_store_key() -> String {
    "site_snapshot".to_string()
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_char_budget() -> usize {
    6000
}

fn default_top_k() -> usize {
    4
}

fn default_coverage_weight() -> u64 {
    100
}

fn default_header_bonus() -> u64 {
    2
}

fn default_header_window() -> usize {
    200
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            store_key: default_store_key(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: default_refresh_interval(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            char_budget: default_char_budget(),
            top_k: default_top_k(),
            coverage_weight: default_coverage_weight(),
            header_bonus_weight: default_header_bonus(),
            header_window_chars: default_header_window(),
        }
    }
}

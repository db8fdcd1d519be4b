//! Semantic validation of parsed configuration
//!
//! TOML parsing only guarantees shape; this module checks that the values
//! actually make sense before any component consumes them.

use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// # Checks
///
/// - The seed URL parses, uses http/https, and has a host
/// - Fetch timeout and concurrency are non-zero, timeout at most 60s
/// - Cache TTL and refresh interval are non-zero
/// - Retrieval top-k and char budget are non-zero; the budget must leave
///   room for at least one provenance header line
/// - Coverage weight is non-zero (a zero weight would let frequency swamp
///   coverage and invert the ranking contract)
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.site.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.site.seed_url, e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url must be http or https, got {}",
            seed.scheme()
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "seed-url has no host".to_string(),
        ));
    }

    if config.site.fetch_timeout_seconds == 0 || config.site.fetch_timeout_seconds > 60 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-seconds must be between 1 and 60, got {}",
            config.site.fetch_timeout_seconds
        )));
    }

    if config.site.fetch_concurrency == 0 {
        return Err(ConfigError::Validation(
            "fetch-concurrency must be at least 1".to_string(),
        ));
    }

    if config.cache.ttl_seconds == 0 {
        return Err(ConfigError::Validation(
            "ttl-seconds must be at least 1".to_string(),
        ));
    }

    if config.cache.store_key.is_empty() {
        return Err(ConfigError::Validation(
            "store-key must not be empty".to_string(),
        ));
    }

    if config.scheduler.refresh_interval_minutes == 0 {
        return Err(ConfigError::Validation(
            "refresh-interval-minutes must be at least 1".to_string(),
        ));
    }

    if config.retrieval.top_k == 0 {
        return Err(ConfigError::Validation(
            "top-k must be at least 1".to_string(),
        ));
    }

    if config.retrieval.char_budget < 64 {
        return Err(ConfigError::Validation(format!(
            "char-budget of {} is too small to hold a provenance header",
            config.retrieval.char_budget
        )));
    }

    if config.retrieval.coverage_weight == 0 {
        return Err(ConfigError::Validation(
            "coverage-weight must be at least 1".to_string(),
        ));
    }

    if config.retrieval.header_window_chars == 0 {
        return Err(ConfigError::Validation(
            "header-window-chars must be at least 1".to_string(),
        ));
    }

    Ok(())
}

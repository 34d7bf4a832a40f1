//! Configuration Module
//!
//! Cache configuration with environment-variable loading and defaults.

use std::env;
use std::time::Duration;

/// Default TTL applied to entries stored without an explicit TTL: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Default maximum number of entries.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Per-instance cache configuration.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for entries stored without an explicit TTL
    pub ttl: Duration,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
}

impl CacheConfig {
    /// Creates a config with the given TTL in milliseconds.
    pub fn with_ttl_ms(ttl_ms: u64, max_size: usize) -> Self {
        Self {
            ttl: Duration::from_millis(ttl_ms),
            max_size,
        }
    }

    /// Creates a new config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_CACHE_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `DATA_CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    pub fn from_env() -> Self {
        Self {
            ttl: env::var("DATA_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TTL),
            max_size: env::var("DATA_CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SIZE),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_size, 100);
    }

    #[test]
    fn test_config_with_ttl_ms() {
        let config = CacheConfig::with_ttl_ms(1500, 10);
        assert_eq!(config.ttl, Duration::from_millis(1500));
        assert_eq!(config.max_size, 10);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DATA_CACHE_TTL_MS");
        env::remove_var("DATA_CACHE_MAX_SIZE");

        let config = CacheConfig::from_env();
        assert_eq!(config.ttl, DEFAULT_TTL);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }
}

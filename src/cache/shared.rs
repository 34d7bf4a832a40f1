//! Shared Cache Module
//!
//! Cloneable async handle around the cache store, plus the process-wide
//! default instance.

use std::sync::Arc;
use std::time::Duration;

use lazy_static::lazy_static;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, DataCache};
use crate::config::CacheConfig;

lazy_static! {
    /// Process-wide default cache: 5 minute TTL, 100 entries.
    static ref GLOBAL_CACHE: SharedCache = SharedCache::from_config(&CacheConfig::default());
}

/// Returns a handle to the process-wide default cache instance.
///
/// All callers share the same underlying store; tests should construct their
/// own [`SharedCache`] to avoid cross-test leakage.
pub fn global_cache() -> SharedCache {
    GLOBAL_CACHE.clone()
}

// == Shared Cache ==
/// Thread-safe, cheaply cloneable handle to a [`DataCache`].
///
/// Every operation takes the lock for the duration of the single map
/// operation only; nothing is held across an await point.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<DataCache>>,
}

impl SharedCache {
    /// Wraps an existing cache store.
    pub fn new(cache: DataCache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a fresh store from a configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(DataCache::from_config(config))
    }

    /// Stores a value, using the instance default TTL unless one is given.
    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        self.inner.write().await.set(key, value, ttl);
    }

    /// Returns the value for `key` if present and unexpired.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.write().await.get(key)
    }

    /// Checks presence with the same lazy-expiry side effect as `get`.
    pub async fn has(&self, key: &str) -> bool {
        self.inner.write().await.has(key)
    }

    /// Removes the entry for `key`; returns whether it existed.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Returns an occupancy snapshot.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}

impl Default for SharedCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

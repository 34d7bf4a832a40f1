//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with FIFO insertion-order
//! tracking and lazy TTL expiry.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, FifoTracker};
use crate::config::CacheConfig;

// == Data Cache ==
/// Bounded key/value cache with per-entry TTL and FIFO eviction.
///
/// Expiry is evaluated lazily at read time: `get` and `has` remove an expired
/// entry when they encounter it. There is no background sweep, so an
/// expired-but-unread entry keeps occupying a slot until the next read,
/// eviction, or `clear`.
///
/// All operations are non-throwing: reads on absent keys are misses, deletes
/// on absent keys are no-ops.
#[derive(Debug)]
pub struct DataCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion-order tracker naming the eviction victim
    order: FifoTracker,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied to entries stored without an explicit TTL
    default_ttl: Duration,
}

impl DataCache {
    // == Constructor ==
    /// Creates a new cache with the given capacity and default TTL.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoTracker::new(),
            max_size,
            default_ttl,
        }
    }

    /// Creates a new cache from a configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size, config.ttl)
    }

    // == Set ==
    /// Stores a value under `key` with the given TTL, or the instance default
    /// if none is given.
    ///
    /// If the key already exists its value and TTL are replaced, the storage
    /// instant is re-stamped, and its insertion position is kept. If the key
    /// is new and the cache is at capacity, the single oldest-inserted entry
    /// is evicted first.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        let key = key.into();
        let is_overwrite = self.entries.contains_key(&key);

        // Only a genuinely new key can push the cache over capacity
        if !is_overwrite && self.entries.len() >= self.max_size {
            match self.order.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    debug!(key = %evicted, "evicted oldest entry at capacity");
                }
                // Zero-capacity cache: nothing can be stored
                None => return,
            }
        }

        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key.clone(), CacheEntry::new(value, effective_ttl));

        if !is_overwrite {
            self.order.record(&key);
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and unexpired.
    ///
    /// An expired entry is removed as a side effect and reported as a miss;
    /// the caller cannot distinguish "expired" from "never cached".
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if self.remove_if_expired(key) {
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Has ==
    /// Checks presence with the same expiry check and lazy-delete side effect
    /// as `get`, without cloning the value.
    pub fn has(&mut self, key: &str) -> bool {
        if self.remove_if_expired(key) {
            return false;
        }
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes the entry for `key` unconditionally.
    ///
    /// Returns whether the entry existed (expired entries count as existing
    /// here, since delete performs no expiry check).
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Stats ==
    /// Returns a read-only snapshot of the cache's occupancy.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.entries.len(), self.max_size, self.order.keys())
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Remove If Expired ==
    /// Removes `key` if its entry exists and has expired.
    ///
    /// Returns true when a removal happened.
    fn remove_if_expired(&mut self, key: &str) -> bool {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            debug!(%key, "removed expired entry on read");
        }

        expired
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

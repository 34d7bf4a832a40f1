//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value with its storage instant and time-to-live.
///
/// Entries are owned exclusively by the cache map; they are created on `set`
/// and destroyed on delete, eviction, or expiry detection.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Instant the value was stored
    pub stored_at: Instant,
    /// How long after `stored_at` the entry stays valid
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Value, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's TTL has elapsed.
    ///
    /// Boundary condition: an entry is still valid at exactly
    /// `stored_at + ttl` and expired strictly after.
    pub fn is_expired(&self) -> bool {
        self.stored_at.elapsed() > self.ttl
    }
}

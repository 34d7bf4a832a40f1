//! Cache Statistics Module
//!
//! Read-only snapshot of the cache's current occupancy.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache occupancy at a point in time.
///
/// Expired-but-unread entries still count toward `size` until the next read
/// removes them (expiry is evaluated lazily, never by a background sweep).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Keys currently present, oldest-inserted first
    pub keys: Vec<String>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a snapshot from the cache's current state.
    pub fn new(size: usize, max_size: usize, keys: Vec<String>) -> Self {
        Self {
            size,
            max_size,
            keys,
        }
    }
}

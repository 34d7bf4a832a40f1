//! Cache Module
//!
//! Provides an in-memory store with lazy TTL expiry and FIFO eviction.

mod entry;
mod fifo;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use fifo::FifoTracker;
pub use shared::{global_cache, SharedCache};
pub use stats::CacheStats;
pub use store::DataCache;

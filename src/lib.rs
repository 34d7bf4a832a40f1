//! data-cache - In-memory TTL cache with FIFO eviction
//!
//! Provides a bounded key/value store with lazy expiry and an async
//! fetch-through wrapper that memoizes expensive producer calls per key.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;

pub use cache::{global_cache, CacheStats, DataCache, SharedCache};
pub use config::CacheConfig;
pub use error::FetchError;
pub use fetch::CachedFetch;

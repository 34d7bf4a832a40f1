//! Cached Fetch Module
//!
//! Consumer-facing wrapper that memoizes the result of an expensive async
//! producer per string key, with observable value/loading/error state.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{global_cache, SharedCache};
use crate::config::CacheConfig;
use crate::error::{FetchError, Result};

/// Boxed zero-argument async producer.
type Producer<T> =
    Box<dyn Fn() -> Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send>> + Send + Sync>;

/// Observable state shared by all readers of one wrapper.
struct FetchState<T> {
    /// Last value returned by `load`, cached or freshly produced
    data: Option<T>,
    /// True only while a producer call is pending
    loading: bool,
    /// Message of the most recent failure, cleared at the start of each call
    error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

// == Cached Fetch ==
/// Binds a cache key to an async producer and a cache instance.
///
/// `load` consults the cache before invoking the producer; a hit returns the
/// cached value without a producer call. Values cross the cache boundary as
/// JSON documents, so `T` must round-trip through serde.
///
/// Concurrent `load` calls are not deduplicated: two calls that both observe
/// a miss both invoke the producer, and the later completion overwrites the
/// cache entry. There is no cancellation and no producer timeout.
pub struct CachedFetch<T> {
    /// Cache key this wrapper reads and writes
    key: String,
    /// Backing cache, shared or private
    cache: SharedCache,
    /// The expensive operation being memoized
    producer: Producer<T>,
    /// Observable value/loading/error state
    state: Arc<RwLock<FetchState<T>>>,
}

impl<T> CachedFetch<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    // == Constructors ==
    /// Creates a wrapper backed by the process-wide default cache.
    pub fn new<F, Fut>(key: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self::with_cache(key, producer, global_cache())
    }

    /// Creates a wrapper backed by a fresh private cache built from `config`.
    pub fn with_config<F, Fut>(key: impl Into<String>, producer: F, config: &CacheConfig) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self::with_cache(key, producer, SharedCache::from_config(config))
    }

    /// Creates a wrapper backed by an explicit cache instance.
    pub fn with_cache<F, Fut>(key: impl Into<String>, producer: F, cache: SharedCache) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let producer: Producer<T> = Box::new(move || {
            Box::pin(producer()) as Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send>>
        });

        Self {
            key: key.into(),
            cache,
            producer,
            state: Arc::new(RwLock::new(FetchState::default())),
        }
    }

    // == Load ==
    /// Returns the value for this key, from cache when possible.
    ///
    /// With `force_refresh = false` a cache hit short-circuits the producer.
    /// Otherwise the producer runs; its result is stored and returned on
    /// success, and on failure the message is recorded in the error state and
    /// the error returned with nothing written to the cache.
    pub async fn load(&self, force_refresh: bool) -> Result<T> {
        self.state.write().await.error = None;

        if !force_refresh {
            if let Some(cached) = self.cache.get(&self.key).await {
                let value: T = match serde_json::from_value(cached) {
                    Ok(value) => value,
                    Err(err) => {
                        self.state.write().await.error = Some(err.to_string());
                        return Err(FetchError::Codec(err));
                    }
                };
                self.state.write().await.data = Some(value.clone());
                return Ok(value);
            }
        }

        debug!(key = %self.key, force_refresh, "cache miss, invoking producer");
        self.state.write().await.loading = true;

        let outcome = (self.producer)().await;

        let mut state = self.state.write().await;
        state.loading = false;

        match outcome {
            Ok(value) => {
                let encoded = match serde_json::to_value(&value) {
                    Ok(encoded) => encoded,
                    Err(err) => {
                        state.error = Some(err.to_string());
                        return Err(FetchError::Codec(err));
                    }
                };
                state.data = Some(value.clone());
                drop(state);

                self.cache.set(self.key.clone(), encoded, None).await;
                Ok(value)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(key = %self.key, error = %message, "producer failed, nothing cached");
                state.error = Some(message.clone());
                Err(FetchError::Producer(message))
            }
        }
    }

    // == Reload ==
    /// Force-refresh fetch: always invokes the producer and overwrites the
    /// cache entry on success.
    pub async fn reload(&self) -> Result<T> {
        self.load(true).await
    }

    // == Evict ==
    /// Removes this key's entry from the cache without fetching.
    ///
    /// Returns whether an entry existed. The observable value state is left
    /// untouched.
    pub async fn evict(&self) -> bool {
        self.cache.delete(&self.key).await
    }

    // == Observable State ==
    /// Last value returned by `load`, if any.
    pub async fn value(&self) -> Option<T> {
        self.state.read().await.data.clone()
    }

    /// True only while a producer call is pending.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Message of the most recent producer failure, if the last call failed.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// The cache key this wrapper is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing cache instance.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_fetch(
        cache: SharedCache,
        calls: Arc<AtomicUsize>,
    ) -> CachedFetch<String> {
        CachedFetch::with_cache(
            "unit_key",
            move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("X".to_string())
                }
            },
            cache,
        )
    }

    #[tokio::test]
    async fn test_load_miss_invokes_producer_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = counting_fetch(SharedCache::default(), calls.clone());

        let value = fetch.load(false).await.unwrap();

        assert_eq!(value, "X");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fetch.value().await, Some("X".to_string()));
        assert!(!fetch.is_loading().await);
        assert_eq!(fetch.last_error().await, None);
    }

    #[tokio::test]
    async fn test_load_hit_skips_producer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = counting_fetch(SharedCache::default(), calls.clone());

        fetch.load(false).await.unwrap();
        let value = fetch.load(false).await.unwrap();

        assert_eq!(value, "X");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_always_fetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = counting_fetch(SharedCache::default(), calls.clone());

        fetch.load(false).await.unwrap();
        fetch.reload().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_producer_failure_records_error_and_caches_nothing() {
        let cache = SharedCache::default();
        let fetch: CachedFetch<String> = CachedFetch::with_cache(
            "fail_key",
            || async { Err(anyhow!("boom")) },
            cache.clone(),
        );

        let err = fetch.load(false).await.unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert_eq!(fetch.last_error().await, Some("boom".to_string()));
        assert!(!fetch.is_loading().await);
        assert!(!cache.has("fail_key").await);
    }

    #[tokio::test]
    async fn test_error_state_cleared_on_next_call() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let fetch: CachedFetch<String> = CachedFetch::with_cache(
            "flaky_key",
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                            Err(anyhow!("first call fails"))
                        } else {
                            Ok("recovered".to_string())
                        }
                    }
                }
            },
            SharedCache::default(),
        );

        assert!(fetch.load(false).await.is_err());
        assert!(fetch.last_error().await.is_some());

        let value = fetch.load(false).await.unwrap();
        assert_eq!(value, "recovered");
        assert_eq!(fetch.last_error().await, None);
    }

    #[tokio::test]
    async fn test_evict_removes_entry_without_fetching() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = counting_fetch(SharedCache::default(), calls.clone());

        fetch.load(false).await.unwrap();
        assert!(fetch.evict().await);
        assert!(!fetch.evict().await);

        // Next load misses again
        fetch.load(false).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

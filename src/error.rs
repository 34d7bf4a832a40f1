//! Error types for the fetch-through wrapper
//!
//! Cache map operations themselves never fail; errors only arise from the
//! consumer's producer callback or from encoding/decoding values at the
//! cache boundary.

use thiserror::Error;

// == Fetch Error Enum ==
/// Errors surfaced by [`CachedFetch::load`](crate::fetch::CachedFetch::load).
#[derive(Error, Debug)]
pub enum FetchError {
    /// The producer callback failed; carries the message recorded in the
    /// wrapper's error state.
    #[error("{0}")]
    Producer(String),

    /// A value could not be encoded into or decoded out of the cache.
    #[error("cache codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producer_error_displays_bare_message() {
        let err = FetchError::Producer("boom".to_string());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_codec_error_from_serde() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = FetchError::from(serde_err);
        assert!(err.to_string().starts_with("cache codec error"));
    }
}

//! Fast cache contract and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// The external fast cache tier (`Get` / `Set` with TTL).
///
/// The cache holds hints only. A miss or an error never means the short code
/// does not exist; callers fall through to the next tier.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached. The resolver
    /// treats this exactly like a miss.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a URL mapping that expires after `ttl_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the write fails. Callers log and drop it.
    async fn set_url(&self, short_code: &str, original_url: &str, ttl_seconds: u64)
    -> CacheResult<()>;
}

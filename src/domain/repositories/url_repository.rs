//! Repository trait for the durable store.

use crate::domain::entities::UrlStats;
use async_trait::async_trait;

/// Errors reported by a durable store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The short code has no durable record.
    #[error("URL not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other backend failure (used by non-SQL implementations).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable, authoritative storage for short URL mappings and click counts.
///
/// Every call is a single best-effort remote operation; callers bound each
/// call with a deadline and never hold local locks across it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a mapping with upsert semantics.
    ///
    /// A second save for an existing code overwrites the URL and never fails on
    /// conflict; rejecting duplicate aliases is the engine's responsibility.
    async fn save_url(&self, short_code: &str, original_url: &str) -> Result<(), StoreError>;

    /// Looks up the original URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if the code has no durable record
    async fn get_url(&self, short_code: &str) -> Result<Option<String>, StoreError>;

    /// Adds one to the durable click counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the durable record does not exist.
    async fn increment_click(&self, short_code: &str) -> Result<(), StoreError>;

    /// Reads the durable click counter and creation time.
    ///
    /// Returns `Ok(None)` if the code has no durable record.
    async fn get_stats(&self, short_code: &str) -> Result<Option<UrlStats>, StoreError>;
}

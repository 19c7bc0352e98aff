//! Short URL records and the values returned by engine operations.

use chrono::{DateTime, Utc};
use std::fmt;

/// A short code mapped to its original URL.
///
/// Created exactly once per short code and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

/// Click statistics for a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStats {
    pub short_code: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Returned to the caller once a mapping is visible in local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub short_code: String,
    pub original_url: String,
}

/// Storage tier that answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// External fast cache (Redis).
    Cache,
    /// Process-local state.
    Local,
    /// Durable store (PostgreSQL).
    Durable,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Cache => "cache",
            Tier::Local => "local",
            Tier::Durable => "durable",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving a short code.
///
/// A miss is not an error: `found` is `false` and `original_url` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub original_url: String,
    pub found: bool,
    pub tier: Option<Tier>,
}

impl Resolution {
    pub fn hit(original_url: String, tier: Tier) -> Self {
        Self {
            original_url,
            found: true,
            tier: Some(tier),
        }
    }

    pub fn miss() -> Self {
        Self {
            original_url: String::new(),
            found: false,
            tier: None,
        }
    }
}

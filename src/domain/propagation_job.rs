//! Background jobs that carry local writes to the external tiers.

/// A single fire-and-forget write to the fast cache or the durable store.
///
/// Jobs are created on the request path and handed to
/// [`crate::domain::propagation_worker::PropagationQueue`]; the request never
/// waits for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationJob {
    /// Persist a newly created mapping (`SaveURL`, upsert).
    SaveUrl {
        short_code: String,
        original_url: String,
    },
    /// Populate the fast cache (`Set`) with a finite TTL.
    CacheUrl {
        short_code: String,
        original_url: String,
        ttl_seconds: u64,
    },
    /// Flush one click to the durable counter (`IncrementClick`).
    IncrementClick { short_code: String },
}

impl PropagationJob {
    pub fn save_url(short_code: &str, original_url: &str) -> Self {
        Self::SaveUrl {
            short_code: short_code.to_string(),
            original_url: original_url.to_string(),
        }
    }

    pub fn cache_url(short_code: &str, original_url: &str, ttl_seconds: u64) -> Self {
        Self::CacheUrl {
            short_code: short_code.to_string(),
            original_url: original_url.to_string(),
            ttl_seconds,
        }
    }

    pub fn increment_click(short_code: &str) -> Self {
        Self::IncrementClick {
            short_code: short_code.to_string(),
        }
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SaveUrl { .. } => "save_url",
            Self::CacheUrl { .. } => "cache_url",
            Self::IncrementClick { .. } => "increment_click",
        }
    }

    pub fn short_code(&self) -> &str {
        match self {
            Self::SaveUrl { short_code, .. }
            | Self::CacheUrl { short_code, .. }
            | Self::IncrementClick { short_code } => short_code,
        }
    }
}

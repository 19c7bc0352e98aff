//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlStats;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub click_count: i64,
    /// Serialized as RFC 3339.
    pub created_at: DateTime<Utc>,
}

impl From<UrlStats> for StatsResponse {
    fn from(stats: UrlStats) -> Self {
        Self {
            short_code: stats.short_code,
            click_count: stats.click_count,
            created_at: stats.created_at,
        }
    }
}

//! PostgreSQL implementation of the durable store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::UrlStats;
use crate::domain::repositories::{StoreError, UrlRepository};

/// PostgreSQL repository backed by the `urls` table.
///
/// Uses runtime-checked SQLx queries with bound parameters.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save_url(&self, short_code: &str, original_url: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO urls (short_code, original_url, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (short_code)
            DO UPDATE SET
                original_url = EXCLUDED.original_url,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(short_code)
        .bind(original_url)
        .execute(self.pool.as_ref())
        .await?;

        debug!(short_code, "URL saved to PostgreSQL");
        Ok(())
    }

    async fn get_url(&self, short_code: &str) -> Result<Option<String>, StoreError> {
        let url = sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn increment_click(&self, short_code: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET click_count = click_count + 1, updated_at = NOW()
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn get_stats(&self, short_code: &str) -> Result<Option<UrlStats>, StoreError> {
        let row = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "SELECT click_count, created_at FROM urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(click_count, created_at)| UrlStats {
            short_code: short_code.to_string(),
            click_count,
            created_at,
        }))
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use url_service::config::EngineSettings;
use url_service::domain::entities::UrlStats;
use url_service::domain::repositories::{StoreError, UrlRepository};
use url_service::infrastructure::cache::{CacheError, CacheResult, CacheService};
use url_service::state::AppState;

#[derive(Debug, Clone)]
pub struct StoredUrl {
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Durable store backed by a map, with failure and latency injection.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: Mutex<HashMap<String, StoredUrl>>,
    delay: Mutex<Option<Duration>>,
    pub fail_increments: AtomicBool,
    pub fail_reads: AtomicBool,
    pub get_url_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub increment_calls: AtomicUsize,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, short_code: &str, original_url: &str) {
        self.rows.lock().insert(
            short_code.to_string(),
            StoredUrl {
                original_url: original_url.to_string(),
                click_count: 0,
                created_at: Utc::now(),
            },
        );
    }

    pub fn row(&self, short_code: &str) -> Option<StoredUrl> {
        self.rows.lock().get(short_code).cloned()
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    async fn pause(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn save_url(&self, short_code: &str, original_url: &str) -> Result<(), StoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        let mut rows = self.rows.lock();
        rows.entry(short_code.to_string())
            .and_modify(|row| row.original_url = original_url.to_string())
            .or_insert_with(|| StoredUrl {
                original_url: original_url.to_string(),
                click_count: 0,
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn get_url(&self, short_code: &str) -> Result<Option<String>, StoreError> {
        self.get_url_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".to_string()));
        }

        Ok(self
            .rows
            .lock()
            .get(short_code)
            .map(|row| row.original_url.clone()))
    }

    async fn increment_click(&self, short_code: &str) -> Result<(), StoreError> {
        let call = self.increment_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        // Every other increment fails when injection is on.
        if self.fail_increments.load(Ordering::SeqCst) && call % 2 == 0 {
            return Err(StoreError::Backend("injected increment failure".to_string()));
        }

        match self.rows.lock().get_mut(short_code) {
            Some(row) => {
                row.click_count += 1;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn get_stats(&self, short_code: &str) -> Result<Option<UrlStats>, StoreError> {
        self.pause().await;

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".to_string()));
        }

        Ok(self.rows.lock().get(short_code).map(|row| UrlStats {
            short_code: short_code.to_string(),
            click_count: row.click_count,
            created_at: row.created_at,
        }))
    }
}

/// Fast cache backed by a map. TTLs are recorded, not enforced.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, u64)>>,
    delay: Mutex<Option<Duration>>,
    pub fail_all: AtomicBool,
    pub get_calls: AtomicUsize,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, short_code: &str) -> Option<(String, u64)> {
        self.entries.lock().get(short_code).cloned()
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    async fn pause(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("injected failure".to_string()));
        }

        Ok(self
            .entries
            .lock()
            .get(short_code)
            .map(|(url, _)| url.clone()))
    }

    async fn set_url(&self, short_code: &str, original_url: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.pause().await;

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("injected failure".to_string()));
        }

        self.entries
            .lock()
            .insert(short_code.to_string(), (original_url.to_string(), ttl_seconds));
        Ok(())
    }
}

pub fn test_settings() -> EngineSettings {
    EngineSettings {
        call_timeout: Duration::from_millis(200),
        ..EngineSettings::default()
    }
}

pub fn create_test_state() -> (AppState, Arc<InMemoryUrlRepository>, Arc<InMemoryCache>) {
    create_test_state_with(test_settings())
}

pub fn create_test_state_with(
    settings: EngineSettings,
) -> (AppState, Arc<InMemoryUrlRepository>, Arc<InMemoryCache>) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(InMemoryCache::new());

    let state = AppState::new(repository.clone(), cache.clone(), settings);

    (state, repository, cache)
}

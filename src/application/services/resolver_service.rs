//! Tiered short code resolution.
//!
//! Lookups go through the fast cache, then local state, then the durable
//! store, stopping at the first hit. Tiers are never invalidated: records are
//! immutable once created, so data only flows from slower tiers into faster
//! ones.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::application::services::StatsService;
use crate::domain::entities::{Resolution, Tier, UrlRecord};
use crate::domain::propagation_job::PropagationJob;
use crate::domain::propagation_worker::PropagationQueue;
use crate::domain::repositories::UrlRepository;
use crate::domain::state_store::StateStore;
use crate::infrastructure::cache::CacheService;
use crate::utils::deadline::{CACHE_TIER, DURABLE_TIER, with_deadline};

pub struct ResolverService {
    state: Arc<StateStore>,
    cache: Arc<dyn CacheService>,
    repository: Arc<dyn UrlRepository>,
    stats: Arc<StatsService>,
    propagation: PropagationQueue,
    call_timeout: Duration,
    warm_cache_ttl_seconds: u64,
}

impl ResolverService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: Arc<StateStore>,
        cache: Arc<dyn CacheService>,
        repository: Arc<dyn UrlRepository>,
        stats: Arc<StatsService>,
        propagation: PropagationQueue,
        call_timeout: Duration,
        warm_cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            state,
            cache,
            repository,
            stats,
            propagation,
            call_timeout,
            warm_cache_ttl_seconds,
        }
    }

    /// Resolves a short code to its original URL.
    ///
    /// Downstream errors and timeouts are treated as misses for that tier and
    /// never reach the caller. Every hit records a click before returning.
    pub async fn resolve(&self, short_code: &str) -> Resolution {
        if short_code.is_empty() {
            return Resolution::miss();
        }

        if let Some(url) = self.lookup_cache(short_code).await {
            return self.hit(short_code, url, Tier::Cache);
        }

        if let Some(url) = self.state.get_url(short_code) {
            self.warm_cache(short_code, &url);
            return self.hit(short_code, url, Tier::Local);
        }

        if let Some(url) = self.lookup_durable(short_code).await {
            let url = self.state.materialize(UrlRecord {
                short_code: short_code.to_string(),
                original_url: url,
                created_at: Utc::now(),
            });
            self.warm_cache(short_code, &url);
            return self.hit(short_code, url, Tier::Durable);
        }

        debug!(short_code, "Short code not found in any tier");
        Resolution::miss()
    }

    fn hit(&self, short_code: &str, url: String, tier: Tier) -> Resolution {
        debug!(short_code, tier = %tier, "Short code resolved");
        self.stats.record_hit(short_code);
        Resolution::hit(url, tier)
    }

    async fn lookup_cache(&self, short_code: &str) -> Option<String> {
        match with_deadline(CACHE_TIER, self.call_timeout, self.cache.get_url(short_code)).await {
            Ok(url) => url,
            Err(e) => {
                warn!(short_code, error = %e, "Cache lookup failed, continuing");
                None
            }
        }
    }

    async fn lookup_durable(&self, short_code: &str) -> Option<String> {
        match with_deadline(
            DURABLE_TIER,
            self.call_timeout,
            self.repository.get_url(short_code),
        )
        .await
        {
            Ok(url) => url,
            Err(e) => {
                warn!(short_code, error = %e, "Durable lookup failed");
                None
            }
        }
    }

    fn warm_cache(&self, short_code: &str, url: &str) {
        self.propagation.submit(PropagationJob::cache_url(
            short_code,
            url,
            self.warm_cache_ttl_seconds,
        ));
    }
}

//! Click counting and statistics lookup.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::UrlStats;
use crate::domain::propagation_job::PropagationJob;
use crate::domain::propagation_worker::PropagationQueue;
use crate::domain::repositories::UrlRepository;
use crate::domain::state_store::StateStore;
use crate::error::AppError;
use crate::utils::deadline::{DURABLE_TIER, with_deadline};

/// Maintains per-code click counters.
///
/// Hits are counted synchronously in local state and flushed to the durable
/// store in the background. A flush that is dropped, fails, or is lost to a
/// restart is never replayed, so the durable counter may lag the local one.
pub struct StatsService {
    state: Arc<StateStore>,
    repository: Arc<dyn UrlRepository>,
    propagation: PropagationQueue,
    call_timeout: Duration,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(
        state: Arc<StateStore>,
        repository: Arc<dyn UrlRepository>,
        propagation: PropagationQueue,
        call_timeout: Duration,
    ) -> Self {
        Self {
            state,
            repository,
            propagation,
            call_timeout,
        }
    }

    /// Records one hit for `short_code`.
    ///
    /// The local counter is incremented only if the code has a local entry. The
    /// durable `IncrementClick` is always submitted.
    pub fn record_hit(&self, short_code: &str) {
        match self.state.increment(short_code) {
            Some(click_count) => debug!(short_code, click_count, "Click recorded"),
            None => debug!(short_code, "No local entry, click sent to durable store only"),
        }

        self.propagation
            .submit(PropagationJob::increment_click(short_code));
    }

    /// Returns click count and creation time.
    ///
    /// Local state is preferred. Codes unknown locally are looked up in the
    /// durable store; a durable error or timeout is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] ("URL not found") if neither tier knows the code.
    pub async fn get_stats(&self, short_code: &str) -> Result<UrlStats, AppError> {
        if let Some(stats) = self.state.stats(short_code) {
            return Ok(stats);
        }

        match with_deadline(
            DURABLE_TIER,
            self.call_timeout,
            self.repository.get_stats(short_code),
        )
        .await
        {
            Ok(Some(stats)) => Ok(stats),
            Ok(None) => Err(not_found(short_code)),
            Err(e) => {
                warn!(short_code, error = %e, "Durable stats lookup failed");
                Err(not_found(short_code))
            }
        }
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "short_code": short_code }))
}

//! Short link creation and write propagation.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{ShortenedUrl, UrlRecord};
use crate::domain::propagation_job::PropagationJob;
use crate::domain::propagation_worker::PropagationQueue;
use crate::domain::state_store::StateStore;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Number of generated codes tried before giving up with a capacity error.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating short links.
///
/// A new mapping is inserted into local state before [`LinkService::create`]
/// returns, so a resolve on the same process always sees it. The durable save
/// and the cache fill are submitted afterwards as fire-and-forget jobs; if they
/// fail, the local copy stays authoritative for this process.
pub struct LinkService {
    state: Arc<StateStore>,
    propagation: PropagationQueue,
    generator: Arc<dyn CodeGenerator>,
    shorten_cache_ttl_seconds: u64,
}

impl LinkService {
    /// Creates a link service using [`RandomCodeGenerator`].
    pub fn new(
        state: Arc<StateStore>,
        propagation: PropagationQueue,
        shorten_cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            state,
            propagation,
            generator: Arc::new(RandomCodeGenerator),
            shorten_cache_ttl_seconds,
        }
    }

    /// Replaces the code generator.
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Creates a short link.
    ///
    /// An empty `custom_alias` is treated as absent. The URL and alias are taken
    /// as given; request-shape checks belong to the HTTP DTO.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] ("Custom alias already exists") if the alias is taken.
    /// Returns [`AppError::Capacity`] if [`MAX_GENERATION_ATTEMPTS`] generated codes all collided.
    pub fn create(
        &self,
        original_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<ShortenedUrl, AppError> {
        let created_at = Utc::now();

        let short_code = match custom_alias.filter(|alias| !alias.is_empty()) {
            Some(alias) => {
                let record = UrlRecord {
                    short_code: alias.to_string(),
                    original_url: original_url.to_string(),
                    created_at,
                };

                if !self.state.insert_new(record) {
                    return Err(AppError::conflict(
                        "Custom alias already exists",
                        json!({ "short_code": alias }),
                    ));
                }

                alias.to_string()
            }
            None => self.insert_generated(original_url, created_at)?,
        };

        info!(short_code = %short_code, original_url, "Short URL created");

        self.propagation
            .submit(PropagationJob::save_url(&short_code, original_url));
        self.propagation.submit(PropagationJob::cache_url(
            &short_code,
            original_url,
            self.shorten_cache_ttl_seconds,
        ));

        Ok(ShortenedUrl {
            short_code,
            original_url: original_url.to_string(),
        })
    }

    /// Inserts under a freshly generated code, retrying on collision.
    fn insert_generated(
        &self,
        original_url: &str,
        created_at: chrono::DateTime<Utc>,
    ) -> Result<String, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = self.generator.generate();

            let record = UrlRecord {
                short_code: code.clone(),
                original_url: original_url.to_string(),
                created_at,
            };

            if self.state.insert_new(record) {
                return Ok(code);
            }

            debug!(short_code = %code, attempt, "Generated code collided, retrying");
        }

        Err(AppError::capacity(
            "Failed to generate unique short code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}

//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, ResolverService, StatsService};
use crate::config::EngineSettings;
use crate::domain::propagation_worker::PropagationQueue;
use crate::domain::repositories::UrlRepository;
use crate::domain::state_store::StateStore;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub resolver_service: Arc<ResolverService>,
    pub stats_service: Arc<StatsService>,
    pub state_store: Arc<StateStore>,
    pub propagation: PropagationQueue,
}

impl AppState {
    /// Wires the engine on top of the given external tiers.
    ///
    /// Starts the propagation worker, so this must be called inside a tokio runtime.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        settings: EngineSettings,
    ) -> Self {
        let state_store = Arc::new(StateStore::new());
        let propagation =
            PropagationQueue::start(repository.clone(), cache.clone(), settings.propagation());

        let stats_service = Arc::new(StatsService::new(
            state_store.clone(),
            repository.clone(),
            propagation.clone(),
            settings.call_timeout,
        ));

        let link_service = Arc::new(LinkService::new(
            state_store.clone(),
            propagation.clone(),
            settings.shorten_cache_ttl_seconds,
        ));

        let resolver_service = Arc::new(ResolverService::new(
            state_store.clone(),
            cache,
            repository,
            stats_service.clone(),
            propagation.clone(),
            settings.call_timeout,
            settings.warm_cache_ttl_seconds,
        ));

        Self {
            link_service,
            resolver_service,
            stats_service,
            state_store,
            propagation,
        }
    }
}

//! Application layer services implementing the URL engine.
//!
//! Services coordinate local state, the propagation queue and the external
//! tiers. They consume the repository and cache traits and expose a small API
//! for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and write propagation
//! - [`services::resolver_service::ResolverService`] - Tiered short code resolution
//! - [`services::stats_service::StatsService`] - Click counting and statistics

pub mod services;

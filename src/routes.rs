//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/shorten`       - Create a short link
//! - `GET  /api/urls/{code}`   - Resolve a short code
//! - `GET  /api/stats/{code}`  - Click statistics
//!
//! Every request runs inside a tracing span ([`crate::api::middleware::tracing`]).

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}

//! API route configuration.

use crate::api::handlers::{resolve_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short link
/// - `GET  /urls/{code}`   - Resolve a short code
/// - `GET  /stats/{code}`  - Click statistics for a short code
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls/{code}", get(resolve_handler))
        .route("/stats/{code}", get(stats_handler))
}

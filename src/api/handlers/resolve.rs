//! Handler for short code resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::resolve::ResolveResponse;
use crate::state::AppState;

/// Looks up the original URL for a short code.
///
/// # Endpoint
///
/// `GET /api/urls/{code}`
///
/// Always answers 200. Unknown codes, and codes no reachable tier knows, come
/// back as `{"original_url": "", "found": false}`.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Json<ResolveResponse> {
    Json(state.resolver_service.resolve(&code).await.into())
}

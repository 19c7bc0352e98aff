//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "custom_alias": "promo"
/// }
/// ```
///
/// `custom_alias` is optional; empty or absent means a code is generated.
///
/// # Response
///
/// ```json
/// { "short_code": "promo", "original_url": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the custom alias is already taken.
/// Returns 503 Service Unavailable if no free code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create(&payload.original_url, payload.custom_alias.as_deref())?;

    Ok(Json(link.into()))
}

//! DTOs for the link shortening endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::ShortenedUrl;

/// An alias travels as one path segment: no `/` and no control characters.
/// Empty is allowed and means "no alias".
static CUSTOM_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/\p{Cc}]*$").unwrap());

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten, stored exactly as sent.
    #[validate(length(min = 1, message = "Original URL must not be empty"))]
    pub original_url: String,

    /// Optional custom short code.
    #[validate(length(max = 64, message = "Custom alias must be at most 64 characters"))]
    #[validate(regex(
        path = "*CUSTOM_ALIAS_REGEX",
        message = "Custom alias must not contain '/' or control characters"
    ))]
    pub custom_alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
}

impl From<ShortenedUrl> for ShortenResponse {
    fn from(link: ShortenedUrl) -> Self {
        Self {
            short_code: link.short_code,
            original_url: link.original_url,
        }
    }
}

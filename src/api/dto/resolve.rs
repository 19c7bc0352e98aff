//! DTOs for the resolve endpoint.

use serde::Serialize;

use crate::domain::entities::Resolution;

/// Result of a lookup. A miss is reported with `found: false`, not as an error.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub original_url: String,
    pub found: bool,
}

impl From<Resolution> for ResolveResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            original_url: resolution.original_url,
            found: resolution.found,
        }
    }
}

//! Deadline wrapper for outbound calls.

use std::future::Future;
use std::time::Duration;

use crate::error::DownstreamError;

/// Tier label for fast cache calls.
pub const CACHE_TIER: &str = "fast cache";

/// Tier label for durable store calls.
pub const DURABLE_TIER: &str = "durable store";

/// Runs an outbound call with a fixed deadline.
///
/// Dropping the returned future cancels only the wrapped call.
///
/// # Errors
///
/// Returns [`DownstreamError::Timeout`] when the deadline elapses, otherwise the
/// call's own error converted into [`DownstreamError`].
pub async fn with_deadline<T, E, F>(
    tier: &'static str,
    deadline: Duration,
    call: F,
) -> Result<T, DownstreamError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<DownstreamError>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(DownstreamError::Timeout {
            tier,
            after: deadline,
        }),
    }
}

//! Fixed-interval retries for dependencies that may come up after the service.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

/// Runs `connect` up to `attempts` times, sleeping `delay` between tries.
///
/// Every failed attempt is logged at `warn`. `attempts` below 1 still makes a
/// single attempt.
///
/// # Errors
///
/// Returns the error of the last attempt once all attempts have failed.
pub async fn retry_startup<T, E, F, Fut>(
    what: &str,
    attempts: u32,
    delay: Duration,
    mut connect: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = attempts.max(1);
    let strategy = FixedInterval::new(delay).take(attempts as usize - 1);

    let mut attempt = 0u32;
    Retry::spawn(strategy, || {
        attempt += 1;
        let current = attempt;
        let call = connect();
        async move {
            call.await.inspect_err(|e| {
                tracing::warn!(
                    attempt = current,
                    attempts,
                    "{} attempt {}/{} failed: {}",
                    what,
                    current,
                    attempts,
                    e
                );
            })
        }
    })
    .await
}

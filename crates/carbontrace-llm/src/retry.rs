//! Retry with exponential backoff for provider HTTP calls

use crate::LlmError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run `attempt` up to `max_retries` times, backing off 1s, 2s, 4s, ...
///
/// Only transient errors are retried; anything else is returned at once.
pub(crate) async fn with_retries<F, Fut, T>(max_retries: u32, mut attempt: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let max_retries = max_retries.max(1);
    let mut attempts = 0;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                attempts += 1;
                if attempts >= max_retries {
                    return Err(e);
                }
                warn!("Provider attempt {}/{} failed: {}", attempts, max_retries, e);
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

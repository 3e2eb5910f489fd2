//! Bounded retry for rate-limited trend source calls.

use std::future::Future;

use tracing::warn;

use gtrends_client::{Result, TrendsError};

use crate::config::RetryPolicy;
use crate::traits::Sleeper;

/// Invoke `op`, absorbing the rate-limit signal with a fixed backoff, up to
/// `policy.max_attempts` attempts in total. Every other error propagates on
/// first occurrence; retry is exclusively for the rate-limit signal.
pub async fn call_with_retry<T, F, Fut>(
    policy: RetryPolicy,
    sleeper: &dyn Sleeper,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Err(TrendsError::RateLimited) if attempt < policy.max_attempts => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    backoff_secs = policy.backoff.as_secs(),
                    "Rate limited (429), backing off before retry"
                );
                sleeper.sleep(policy.backoff).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

//! Retry wrapper for indexer lookups.
//!
//! Only [`IndexerError::NotFound`] is ever retried: the indexer answers "not found" until it has
//! caught up with the chain. Every other error is returned on the spot.
use std::future::Future;
use std::time::Duration;

use rollups_indexer_client_interface::IndexerError;
use tracing::debug;

/// Default attempt ceiling for point lookups.
pub const DEFAULT_LOOKUP_MAX_ATTEMPTS: u32 = 3;
/// Default wait before the first retry of a point lookup.
pub const DEFAULT_LOOKUP_INITIAL_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Wait `initial_delay` between every attempt.
    Fixed,
    /// Double the wait after every retry, capped at `max_delay`.
    Exponential { max_delay: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    /// Total attempts including the first one. `None` retries forever.
    pub max_attempts: Option<u32>,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_LOOKUP_INITIAL_DELAY,
            max_attempts: Some(DEFAULT_LOOKUP_MAX_ATTEMPTS),
            backoff: Backoff::Exponential { max_delay: Duration::from_secs(15) },
        }
    }
}

impl RetryPolicy {
    pub fn fixed(delay: Duration, max_attempts: Option<u32>) -> Self {
        Self { initial_delay: delay, max_attempts, backoff: Backoff::Fixed }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self { initial_delay: Duration::ZERO, max_attempts: Some(1), backoff: Backoff::Fixed }
    }

    /// Wait before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.initial_delay,
            Backoff::Exponential { max_delay } => {
                // cap the exponent so the multiplication cannot overflow
                let exponent = retry.saturating_sub(1).min(16);
                self.initial_delay.saturating_mul(2_u32.saturating_pow(exponent)).min(max_delay)
            }
        }
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Runs `operation` until it succeeds, fails with something other than not-found, or the policy
/// runs out of attempts. The last not-found error is returned in that case.
pub async fn retry_not_found<T, F, Fut>(policy: &RetryPolicy, target: &str, mut operation: F) -> Result<T, IndexerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IndexerError>>,
{
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        debug!(target_resource = %target, attempt = attempts, "Querying indexer");
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_not_found() && !policy.exhausted(attempts) => {
                let delay = policy.delay_for(attempts);
                debug!(
                    target_resource = %target,
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Resource not indexed yet, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

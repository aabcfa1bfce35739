//! Retry with exponential back-off and jitter for the YouTube client.
//!
//! [`retry_with_backoff`] wraps a fallible async request and retries while the
//! error's [`FailureKind`] is transient. Permanent failures and exhausted
//! budgets are returned to the caller unchanged.

use std::future::Future;
use std::time::Duration;

use crate::error::{FailureKind, YouTubeError};

/// Upper bound on the exponential part of a single delay.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Retry budget and back-off schedule for every client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    pub backoff_base: Duration,
    /// Upper bound of the uniform random jitter added to each delay.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_millis(1_500),
            jitter: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base: Duration::from_millis(backoff_base_ms),
            ..Self::default()
        }
    }

    /// Policy without any sleeping, for tests against mock servers.
    #[must_use]
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_base: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Delay before the retry following failed attempt `attempt` (0-based):
    /// `backoff_base * 2^attempt + unit_random * jitter`.
    ///
    /// `unit_random` is expected in `[0, 1)`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, unit_random: f64) -> Duration {
        let exponential = self
            .backoff_base
            .saturating_mul(1u32 << attempt.min(16))
            .min(MAX_BACKOFF);
        exponential + self.jitter.mul_f64(unit_random.clamp(0.0, 1.0))
    }
}

/// Runs `operation` with up to `policy.max_retries` additional attempts on
/// transient errors, sleeping on the tokio timer between attempts.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    operation: F,
) -> Result<T, YouTubeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, YouTubeError>>,
{
    retry_with_sleeper(policy, label, operation, tokio::time::sleep).await
}

async fn retry_with_sleeper<T, F, Fut, S, SFut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
    mut sleep: S,
) -> Result<T, YouTubeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, YouTubeError>>,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if err.kind() == FailureKind::Permanent || attempt >= policy.max_retries {
                    return Err(err);
                }
                let delay = policy.delay_for(attempt, rand::random::<f64>());
                attempt += 1;
                tracing::warn!(
                    request = label,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "YouTube transient error, retrying after back-off"
                );
                sleep(delay).await;
            }
        }
    }
}

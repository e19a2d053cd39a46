//! Retry policy with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::ApiError;
use crate::pacing::Sleeper;

/// How many times to attempt a call and how long to wait between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            multiplier: 2,
        }
    }
}

/// All attempts failed, or a failure was not worth retrying.
#[derive(Debug)]
pub struct RetryExhausted {
    pub attempts: u32,
    pub last_error: ApiError,
}

impl RetryPolicy {
    /// Delay that follows the given failed attempt (1-based).
    pub fn delay_after_failure(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1);
        self.initial_delay
            .saturating_mul(self.multiplier.saturating_pow(exponent))
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error, or the attempt
    /// budget is spent. No delay follows the final attempt.
    pub async fn run<T, F, Fut>(
        &self,
        sleeper: &dyn Sleeper,
        mut operation: F,
    ) -> Result<T, RetryExhausted>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let retryable = err.is_retryable();
                    if !retryable || attempt >= max_attempts {
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: err,
                        });
                    }
                    let delay = self.delay_after_failure(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "generation attempt failed, backing off"
                    );
                    sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

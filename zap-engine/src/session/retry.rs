//! Submission retry policy

use std::time::Duration;

/// Default retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default first backoff delay
pub const DEFAULT_BASE_DELAY_MS: u64 = 500;
/// Default backoff cap
pub const DEFAULT_MAX_DELAY_MS: u64 = 8_000;

/// Capped exponential backoff for transient submission failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Retry transient failures inside `submit()`; when false the caller
    /// drives retries through `retry()`
    pub automatic: bool,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
            automatic: true,
        }
    }

    /// Single attempt, never retried
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Leave retries to the caller
    pub fn manual(mut self) -> Self {
        self.automatic = false;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (1-based): base * 2^(retry-1), capped
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_RETRIES,
            Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        )
    }
}

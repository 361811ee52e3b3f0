//! Retry policy configuration and normalization

use reqwest::StatusCode;
use std::time::Duration;

use crate::defaults;

/// User-facing retry configuration.
///
/// Values are taken as given and only sanitized by [`normalize`](Self::normalize):
/// a negative retry count becomes 0, zero backoff bounds fall back to the
/// defaults, and `max_backoff` is raised to at least `initial_backoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicyConfig {
    /// Retries after the first attempt
    pub max_retries: i32,
    /// Wait before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for the doubling backoff
    pub max_backoff: Duration,
    /// Retry on 429 Too Many Requests
    pub retry_on_429: bool,
    /// Retry on any 5xx status
    pub retry_on_5xx: bool,
}

impl Default for RetryPolicyConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::retry::MAX_RETRIES as i32,
            initial_backoff: defaults::retry::INITIAL_BACKOFF,
            max_backoff: defaults::retry::MAX_BACKOFF,
            retry_on_429: defaults::retry::RETRY_ON_429,
            retry_on_5xx: defaults::retry::RETRY_ON_5XX,
        }
    }
}

impl RetryPolicyConfig {
    /// Create a config holding the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum retries
    pub const fn with_max_retries(mut self, max_retries: i32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set initial backoff
    pub const fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Set maximum backoff
    pub const fn with_max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
        self
    }

    /// Enable or disable retries on 429
    pub const fn with_retry_on_429(mut self, enabled: bool) -> Self {
        self.retry_on_429 = enabled;
        self
    }

    /// Enable or disable retries on 5xx
    pub const fn with_retry_on_5xx(mut self, enabled: bool) -> Self {
        self.retry_on_5xx = enabled;
        self
    }

    /// Produce the normalized policy.
    pub fn normalize(self) -> RetryPolicy {
        let initial_backoff = if self.initial_backoff.is_zero() {
            defaults::retry::INITIAL_BACKOFF
        } else {
            self.initial_backoff
        };
        let max_backoff = if self.max_backoff.is_zero() {
            defaults::retry::MAX_BACKOFF
        } else {
            self.max_backoff
        };
        RetryPolicy {
            max_retries: self.max_retries.max(0) as u32,
            initial_backoff,
            max_backoff: max_backoff.max(initial_backoff),
            retry_on_429: self.retry_on_429,
            retry_on_5xx: self.retry_on_5xx,
        }
    }
}

/// Normalized retry policy used by the executor.
///
/// Only obtainable through [`RetryPolicyConfig::normalize`] or `Default`, so
/// `initial_backoff > 0` and `max_backoff >= initial_backoff` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    retry_on_429: bool,
    retry_on_5xx: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicyConfig::default().normalize()
    }
}

impl From<RetryPolicyConfig> for RetryPolicy {
    fn from(config: RetryPolicyConfig) -> Self {
        config.normalize()
    }
}

impl RetryPolicy {
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub const fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    pub const fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    pub const fn retry_on_429(&self) -> bool {
        self.retry_on_429
    }

    pub const fn retry_on_5xx(&self) -> bool {
        self.retry_on_5xx
    }

    /// Whether a transport failure on `attempt` (0-based) may be retried.
    pub fn should_retry_on_transport_error(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Whether a response with `status` on `attempt` (0-based) may be retried.
    pub fn should_retry_on_status(&self, attempt: u32, status: StatusCode) -> bool {
        attempt < self.max_retries && self.retries_status(status)
    }

    /// Whether `status` is one this policy retries, ignoring the budget.
    pub fn retries_status(&self, status: StatusCode) -> bool {
        (status == StatusCode::TOO_MANY_REQUESTS && self.retry_on_429)
            || (status.is_server_error() && self.retry_on_5xx)
    }

    /// Wait before retrying `attempt`: `initial_backoff * 2^attempt`, capped at
    /// `max_backoff`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let mut delay = self.initial_backoff;
        for _ in 0..attempt {
            delay = delay.saturating_mul(2);
            if delay >= self.max_backoff {
                return self.max_backoff;
            }
        }
        delay
    }
}

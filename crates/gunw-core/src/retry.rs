use std::time::Duration;

use backon::ExponentialBuilder;

/// Retry policy for outbound calls.
///
/// `max_attempts` counts the first try, so `1` means no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            min_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }

    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Retries after the first attempt.
    pub fn retries(&self) -> usize {
        self.max_attempts.saturating_sub(1) as usize
    }

    /// Jittered exponential backoff for `backon` retries.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.retries())
            .with_jitter()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

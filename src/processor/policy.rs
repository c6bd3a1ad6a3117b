use std::time::Duration;

use crate::config::Settings;

/// Fixed-delay retry for failed receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn forever(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    pub fn limited(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: Some(max_attempts),
        }
    }

    /// Whether `consecutive_failures` has used up the allowed attempts.
    pub fn is_exhausted(&self, consecutive_failures: u32) -> bool {
        self.max_attempts.is_some_and(|max| consecutive_failures >= max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::forever(Duration::from_secs(10))
    }
}

/// How the processor polls the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub max_messages: i32,
    pub wait_secs: i32,
    pub retry: RetryPolicy,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_messages: 1,
            wait_secs: 20,
            retry: RetryPolicy::default(),
        }
    }
}

impl From<&Settings> for ProcessorConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            max_messages: settings.queue.batch,
            wait_secs: settings.queue.wait_secs,
            retry: RetryPolicy {
                delay: Duration::from_secs(settings.worker.backoff_secs),
                max_attempts: settings.worker.attempts,
            },
        }
    }
}

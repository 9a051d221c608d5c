//! Retry policy for rate limited requests

use std::time::Duration;
use log::debug;

/// What to do with a non-success status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction
{   /// Credential problem, never retried
    Auth
  , /// Rate limited, back off and retry
    Retry
  , /// Anything else, surface immediately
    Fail
}

/// Classify a non-success HTTP status
pub fn classify_status(status: u16) -> StatusAction
{   match status
    {   401 => StatusAction::Auth
      , 429 => StatusAction::Retry
      , _ => StatusAction::Fail
    }
}

/// Exponential backoff policy, doubling from the base delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy
{   pub max_retries: u32
  , pub base_delay: Duration
}

impl RetryPolicy
{   pub fn new(
      max_retries: u32
    , base_delay_ms: u64
    ) -> Self
    {   RetryPolicy
        {   max_retries
          , base_delay: Duration::from_millis(base_delay_ms)
        }
    }

    /// Delay to wait after `attempt` (zero based) was rate limited
    pub fn backoff_for_attempt(
      &self
    , attempt: u32
    ) -> Duration
    {   let delay = self.base_delay
          .saturating_mul(2u32.saturating_pow(attempt));
        debug!(
          "Backoff for attempt {}: {}ms",
          attempt, delay.as_millis()
        );
        delay
    }

    /// Whether another retry is allowed after `attempt` retries
    pub fn can_retry(&self, attempt: u32) -> bool
    {   attempt < self.max_retries
    }

    /// Sum of every backoff delay, the worst case wait before giving up
    pub fn total_backoff(&self) -> Duration
    {   (0..self.max_retries)
          .map(|a| self.backoff_for_attempt(a))
          .sum()
    }
}

impl Default for RetryPolicy
{   fn default() -> Self
    {   RetryPolicy::from(&crate::config::RetryConfig::default())
    }
}

impl From<&crate::config::RetryConfig> for RetryPolicy
{   fn from(config: &crate::config::RetryConfig) -> Self
    {   RetryPolicy::new(config.max_retries, config.base_delay_ms)
    }
}

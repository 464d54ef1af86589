//! Retry configuration for upstream snapshot fetches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resilience::RetryPolicy;

/// Retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per fetch, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Backoff before the second attempt in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Upper bound on a single backoff in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Backoff multiplier.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Jitter factor (0.2 = ±20%).
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
            jitter: default_jitter(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
        }
    }
}

impl RetryConfig {
    /// Build the runtime retry policy.
    #[must_use]
    pub const fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
            self.multiplier,
            self.jitter,
            Duration::from_millis(self.attempt_timeout_ms),
        )
    }
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    200
}

const fn default_max_backoff_ms() -> u64 {
    5_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_jitter() -> f64 {
    0.2
}

const fn default_attempt_timeout_ms() -> u64 {
    2_000
}

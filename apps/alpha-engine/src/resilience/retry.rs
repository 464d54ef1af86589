//! Retry policy with exponential backoff for upstream snapshot fetches.
//!
//! Every attempt runs under `attempt_timeout`. Between attempts the caller
//! sleeps for an exponentially growing, jittered backoff. When attempts are
//! exhausted the last failure is returned and the evidence field is left
//! absent by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use alpha_engine::resilience::{RetryPolicy, retry_with_backoff};
//!
//! let policy = RetryPolicy::default();
//! let chain = retry_with_backoff(&policy, |_attempt| port.fetch_options_chain(&ticker)).await;
//! // Without jitter: attempt, ~200ms, attempt, ~400ms, attempt
//! ```

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that know whether another attempt could succeed.
pub trait Retryable {
    /// Whether the failure is transient.
    fn is_retryable(&self) -> bool;
}

/// Retry policy for upstream fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first (default: 3).
    pub max_attempts: u32,
    /// Backoff before the second attempt (default: 200ms).
    pub initial_backoff: Duration,
    /// Upper bound on any single backoff (default: 5s).
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential growth (default: 2.0).
    pub backoff_multiplier: f64,
    /// Jitter factor for randomization (default: 0.2 = ±20%).
    pub jitter_factor: f64,
    /// Time limit for one attempt (default: 2s).
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter_factor: 0.2,
            attempt_timeout: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with custom settings.
    #[must_use]
    pub const fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
        jitter_factor: f64,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
            jitter_factor,
            attempt_timeout,
        }
    }
}

/// Calculator for exponential backoff with jitter.
///
/// Yields one backoff per retry, so `max_attempts - 1` values in total.
#[derive(Debug)]
pub struct ExponentialBackoffCalculator {
    current_retry: u32,
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
    backoff_multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoffCalculator {
    /// Create a new backoff calculator from a retry policy.
    #[must_use]
    pub const fn new(policy: &RetryPolicy) -> Self {
        Self {
            current_retry: 0,
            max_retries: policy.max_attempts.saturating_sub(1),
            initial_backoff_ms: policy.initial_backoff.as_millis() as u64,
            max_backoff_ms: policy.max_backoff.as_millis() as u64,
            backoff_multiplier: policy.backoff_multiplier,
            jitter_factor: policy.jitter_factor,
        }
    }

    /// Get the next backoff duration with jitter.
    ///
    /// Returns `None` once every retry has been handed out.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.current_retry >= self.max_retries {
            return None;
        }

        let base_backoff_ms = self.calculate_base_backoff_ms();
        let jittered_ms = self.apply_jitter(base_backoff_ms);
        let capped_ms = jittered_ms.min(self.max_backoff_ms);

        self.current_retry += 1;

        Some(Duration::from_millis(capped_ms))
    }

    fn calculate_base_backoff_ms(&self) -> u64 {
        let multiplier = self.backoff_multiplier.powi(self.current_retry as i32);
        let backoff = (self.initial_backoff_ms as f64 * multiplier) as u64;
        backoff.min(self.max_backoff_ms)
    }

    /// Random value in `[backoff * (1 - jitter), backoff * (1 + jitter)]`.
    fn apply_jitter(&self, backoff_ms: u64) -> u64 {
        if self.jitter_factor <= 0.0 || backoff_ms == 0 {
            return backoff_ms;
        }
        let mut rng = rand::rng();
        let jitter_range = backoff_ms as f64 * self.jitter_factor;
        let min = (backoff_ms as f64 - jitter_range).max(0.0);
        let max = backoff_ms as f64 + jitter_range;
        rng.random_range(min..=max) as u64
    }
}

/// Why a retried operation gave up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The last attempt failed.
    #[error("failed after {attempts} attempt(s): {source}")]
    Failed {
        /// Attempts made.
        attempts: u32,
        /// Last failure.
        source: E,
    },

    /// The last attempt exceeded the per-attempt timeout.
    #[error("timed out after {attempts} attempt(s) ({timeout:?} each)")]
    TimedOut {
        /// Attempts made.
        attempts: u32,
        /// Per-attempt limit.
        timeout: Duration,
    },
}

impl<E> RetryError<E> {
    /// Attempts made before giving up.
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Failed { attempts, .. } | Self::TimedOut { attempts, .. } => *attempts,
        }
    }
}

/// Run `op` under `policy`.
///
/// `op` receives the 1-based attempt number. Non-retryable failures stop
/// immediately; timeouts are always retried.
///
/// # Errors
///
/// Returns the last failure (or timeout) once attempts are exhausted.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    E: Retryable,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut backoff = ExponentialBackoffCalculator::new(policy);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let error = match tokio::time::timeout(policy.attempt_timeout, op(attempt)).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(source)) => {
                let retryable = source.is_retryable();
                let error = RetryError::Failed {
                    attempts: attempt,
                    source,
                };
                if !retryable {
                    return Err(error);
                }
                error
            }
            Err(_) => RetryError::TimedOut {
                attempts: attempt,
                timeout: policy.attempt_timeout,
            },
        };

        match backoff.next_backoff() {
            Some(delay) => {
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying fetch");
                tokio::time::sleep(delay).await;
            }
            None => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Flaky {
        transient: bool,
    }

    impl std::fmt::Display for Flaky {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "flaky(transient={})", self.transient)
        }
    }

    impl std::error::Error for Flaky {}

    impl Retryable for Flaky {
        fn is_retryable(&self) -> bool {
            self.transient
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            jitter_factor: 0.0,
            attempt_timeout: Duration::from_millis(50),
            ..RetryPolicy::default()
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_millis(200));
        assert_eq!(policy.attempt_timeout, Duration::from_secs(2));
        assert!((policy.backoff_multiplier - 2.0).abs() < f64::EPSILON);
        assert!((policy.jitter_factor - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exponential_backoff_sequence() {
        let policy = RetryPolicy {
            max_attempts: 4,
            jitter_factor: 0.0,
            ..Default::default()
        };
        let mut backoff = ExponentialBackoffCalculator::new(&policy);

        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(200)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(400)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(800)));
        assert!(backoff.next_backoff().is_none());
    }

    #[test]
    fn test_max_backoff_cap() {
        let policy = RetryPolicy {
            max_attempts: 10,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 10.0,
            jitter_factor: 0.0,
            ..Default::default()
        };
        let mut backoff = ExponentialBackoffCalculator::new(&policy);

        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(5)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_jitter_range() {
        let policy = RetryPolicy::default();

        for _ in 0..100 {
            let mut backoff = ExponentialBackoffCalculator::new(&policy);
            let duration = backoff.next_backoff().unwrap();
            assert!(
                duration >= Duration::from_millis(160) && duration <= Duration::from_millis(240),
                "Duration {duration:?} not in expected range 160-240ms"
            );
        }
    }

    #[test]
    fn test_single_attempt_has_no_backoff() {
        let policy = RetryPolicy {
            max_attempts: 1,
            ..RetryPolicy::default()
        };
        let mut backoff = ExponentialBackoffCalculator::new(&policy);
        assert!(backoff.next_backoff().is_none());
    }

    #[test]
    fn test_backoffs_stop_after_max_attempts() {
        let mut backoff = ExponentialBackoffCalculator::new(&RetryPolicy::default());
        assert!(backoff.next_backoff().is_some());
        assert!(backoff.next_backoff().is_some());
        assert!(backoff.next_backoff().is_none());
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result = retry_with_backoff(&fast_policy(3), move |attempt| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(Flaky { transient: true })
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_returns_last_failure() {
        let result: Result<(), _> =
            retry_with_backoff(&fast_policy(3), |_| async { Err(Flaky { transient: true }) })
                .await;

        let Err(err) = result else {
            panic!("expected exhaustion");
        };
        assert_eq!(err.attempts(), 3);
        assert!(matches!(err, RetryError::Failed { .. }));
    }

    #[tokio::test]
    async fn test_non_retryable_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), _> = retry_with_backoff(&fast_policy(5), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(Flaky { transient: false }) }
        })
        .await;

        assert_eq!(result.unwrap_err().attempts(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_attempt_timeout_is_retried() {
        let policy = RetryPolicy {
            attempt_timeout: Duration::from_millis(10),
            ..fast_policy(2)
        };

        let result: Result<(), RetryError<Flaky>> = retry_with_backoff(&policy, |_| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;

        let Err(err) = result else {
            panic!("expected timeout");
        };
        assert!(matches!(err, RetryError::TimedOut { attempts: 2, .. }));
    }
}

//! Resilience patterns for upstream snapshot fetches.
//!
//! One retry policy (exponential backoff with jitter plus a per-attempt
//! timeout) is shared by every field the evidence assembler fetches.

mod retry;

pub use retry::{
    ExponentialBackoffCalculator, RetryError, RetryPolicy, Retryable, retry_with_backoff,
};

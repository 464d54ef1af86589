//! Options Analytics Errors

use thiserror::Error;

/// Errors that can occur while analyzing an options chain.
///
/// Only [`AnalyticsError::InvalidUnderlyingPrice`] escapes the analyzer; the
/// other variants describe per-contract problems that are counted and skipped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A chain entry is missing required fields or carries invalid values.
    #[error("Malformed contract at index {index}: {reason}")]
    MalformedContract {
        /// Position of the entry in the raw chain.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// No contracts remain for the nearest expiry.
    #[error("Options chain is empty")]
    EmptyChain,

    /// Underlying price is not a positive finite number.
    #[error("Invalid underlying price: {price}")]
    InvalidUnderlyingPrice {
        /// The offending price.
        price: f64,
    },
}

//! Market Data Port (Driven Port)
//!
//! Interface for fetching raw upstream snapshots. Payloads stay as loosely
//! typed JSON; the evidence layer normalizes them.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::shared::Ticker;
use crate::resilience::Retryable;

/// Upstream snapshot kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotKind {
    /// Options chain.
    Chain,
    /// Quote snapshot.
    Quote,
    /// Market-wide macro snapshot.
    Macro,
    /// Short-interest snapshot.
    Short,
}

impl SnapshotKind {
    /// Metric and log label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Quote => "quote",
            Self::Macro => "macro",
            Self::Short => "short",
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market data error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// The provider has nothing for this ticker.
    #[error("No {kind} snapshot reported for {ticker}")]
    NotReported {
        /// Snapshot kind.
        kind: SnapshotKind,
        /// Ticker.
        ticker: String,
    },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// API error.
    #[error("Market data API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },
}

impl Retryable for MarketDataError {
    fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotReported { .. })
    }
}

/// Port for fetching raw snapshots from an upstream provider.
///
/// This is a driven (secondary/outbound) port. The infrastructure layer
/// provides implementations.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Raw options chain for an underlying.
    async fn fetch_options_chain(&self, ticker: &Ticker) -> Result<Value, MarketDataError>;

    /// Raw quote snapshot (last, previous close, day volume, VWAP).
    async fn fetch_quote(&self, ticker: &Ticker) -> Result<Value, MarketDataError>;

    /// Raw market-wide macro snapshot.
    async fn fetch_macro(&self) -> Result<Value, MarketDataError>;

    /// Raw short-interest snapshot.
    async fn fetch_short_snapshot(&self, ticker: &Ticker) -> Result<Value, MarketDataError>;

    /// Identifies the snapshots this port serves for `ticker`.
    ///
    /// Cached scores are shared only between calls with equal fingerprints.
    /// A live provider serves one current view per ticker and keeps the
    /// default; adapters holding caller-supplied data hash that data.
    fn snapshot_fingerprint(&self, _ticker: &Ticker) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_reported_is_not_retryable() {
        let err = MarketDataError::NotReported {
            kind: SnapshotKind::Short,
            ticker: "AAPL".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "No short snapshot reported for AAPL");
    }

    #[test]
    fn transport_errors_are_retryable() {
        assert!(
            MarketDataError::ConnectionError {
                message: "reset".to_string()
            }
            .is_retryable()
        );
        assert!(MarketDataError::RateLimited { retry_after_secs: 1 }.is_retryable());
    }
}

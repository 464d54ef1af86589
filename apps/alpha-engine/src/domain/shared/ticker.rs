//! Ticker value object for equity identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Maximum accepted ticker length.
const MAX_TICKER_LEN: usize = 10;

/// An equity ticker in the scoring universe.
///
/// Examples: "AAPL", "BRK.B", "RDS-A". Normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a ticker without validation.
    ///
    /// The value is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Parse and validate a ticker.
    ///
    /// # Errors
    ///
    /// Returns error if the ticker is empty, too long, or contains characters
    /// other than ASCII alphanumerics, `.` and `-`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let ticker = Self::new(value);
        ticker.validate()?;
        Ok(ticker)
    }

    /// Validate the ticker.
    ///
    /// # Errors
    ///
    /// Returns error if the ticker is empty or malformed.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::invalid("ticker", "Ticker cannot be empty"));
        }

        if self.0.len() > MAX_TICKER_LEN {
            return Err(DomainError::invalid(
                "ticker",
                "Ticker exceeds maximum length",
            ));
        }

        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(DomainError::invalid(
                "ticker",
                "Ticker contains invalid characters",
            ));
        }

        Ok(())
    }

    /// Get the ticker string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_new_normalizes_case_and_whitespace() {
        assert_eq!(Ticker::new(" aapl ").as_str(), "AAPL");
    }

    #[test]
    fn ticker_parse_accepts_share_classes() {
        assert_eq!(Ticker::parse("brk.b").unwrap().as_str(), "BRK.B");
        assert_eq!(Ticker::parse("RDS-A").unwrap().as_str(), "RDS-A");
    }

    #[test]
    fn ticker_parse_rejects_empty() {
        let err = Ticker::parse("   ").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn ticker_parse_rejects_invalid_characters() {
        assert!(Ticker::parse("AA PL").is_err());
        assert!(Ticker::parse("AAPL$").is_err());
    }

    #[test]
    fn ticker_parse_rejects_long_values() {
        assert!(Ticker::parse("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn ticker_ordering_is_lexicographic() {
        let mut tickers = vec![Ticker::new("MSFT"), Ticker::new("AAPL")];
        tickers.sort();
        assert_eq!(tickers[0].as_str(), "AAPL");
    }

    #[test]
    fn ticker_serde_transparent() {
        let json = serde_json::to_string(&Ticker::new("nvda")).unwrap();
        assert_eq!(json, "\"NVDA\"");
    }
}

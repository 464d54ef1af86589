//! Rich error handling for the alpha engine.
//!
//! Hard failures only: missing or stale upstream data never surfaces here,
//! it leaves evidence fields absent instead.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed request body |
//! | `INVALID_TICKER` | 400 | Empty or malformed ticker |
//! | `INVALID_UNDERLYING_PRICE` | 400 | Spot price ≤ 0 or non-finite |
//! | `INTERNAL_ERROR` | 500 | Unexpected server error |

use std::fmt;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::options_analytics::AnalyticsError;
use crate::domain::shared::DomainError;

/// Error codes for the alpha engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request format or missing fields.
    InvalidRequest,
    /// Empty or malformed ticker.
    InvalidTicker,
    /// Caller-supplied underlying price is not positive and finite.
    InvalidUnderlyingPrice,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::InvalidTicker | Self::InvalidUnderlyingPrice => {
                StatusCode::BAD_REQUEST
            }
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the wire reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidTicker => "INVALID_TICKER",
            Self::InvalidUnderlyingPrice => "INVALID_UNDERLYING_PRICE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context for the alpha engine.
#[derive(Debug, Error)]
pub struct EngineError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl EngineError {
    /// Create a new engine error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Invalid request format.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Convert to an HTTP error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            error: self.message.clone(),
            code: self.code.reason().to_string(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidValue { field, .. } if field == "ticker" => {
                Self::new(ErrorCode::InvalidTicker, err.to_string())
            }
            DomainError::InvalidValue { field, .. } => {
                let field = field.clone();
                Self::invalid_request(err.to_string()).with_context("field", field)
            }
            DomainError::InvariantViolation { .. } => Self::internal(err.to_string()),
        }
    }
}

impl From<AnalyticsError> for EngineError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::InvalidUnderlyingPrice { price } => Self::new(
                ErrorCode::InvalidUnderlyingPrice,
                format!("Underlying price must be positive and finite, got {price}"),
            ),
            other => Self::internal(other.to_string()),
        }
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Error code string.
    pub code: String,
    /// Additional details.
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub details: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidTicker.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_engine_error_creation() {
        let error = EngineError::invalid_request("Bad request")
            .with_context("field", "tickers")
            .with_context("value", "[]");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Bad request");
        assert_eq!(error.context().len(), 2);
    }

    #[test]
    fn test_ticker_domain_error_maps_to_invalid_ticker() {
        let error: EngineError = DomainError::invalid("ticker", "Ticker cannot be empty").into();
        assert_eq!(error.code(), ErrorCode::InvalidTicker);
    }

    #[test]
    fn test_invalid_price_maps_to_bad_request() {
        let error: EngineError = AnalyticsError::InvalidUnderlyingPrice { price: -1.0 }.into();
        assert_eq!(error.code(), ErrorCode::InvalidUnderlyingPrice);
        assert_eq!(error.code().http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_to_http_response() {
        let response = EngineError::invalid_request("tickers must not be empty")
            .with_context("field", "tickers")
            .to_http_response();

        assert_eq!(response.code, "INVALID_REQUEST");
        assert_eq!(response.error, "tickers must not be empty");
        assert!(response.details.contains_key("field"));
    }

    #[test]
    fn test_error_display() {
        let error = EngineError::invalid_request("Missing field");
        assert_eq!(error.to_string(), "[INVALID_REQUEST] Missing field");
    }
}

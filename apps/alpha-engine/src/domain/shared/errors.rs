//! Domain errors for the alpha engine.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Aggregate invariant violated.
    InvariantViolation {
        /// Aggregate type.
        aggregate: String,
        /// Invariant that was violated.
        invariant: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidValue`].
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for {field}: {message}")
            }
            Self::InvariantViolation {
                aggregate,
                invariant,
            } => write!(f, "{aggregate} invariant violated: {invariant}"),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::invalid("ticker", "Ticker cannot be empty");
        assert_eq!(
            err.to_string(),
            "Invalid value for ticker: Ticker cannot be empty"
        );
    }

    #[test]
    fn invariant_display() {
        let err = DomainError::InvariantViolation {
            aggregate: "PillarScore".to_string(),
            invariant: "score exceeds max".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "PillarScore invariant violated: score exceeds max"
        );
    }
}

//! Presence-tagged evidence fields.

use serde::{Deserialize, Serialize};

/// Why a field carries no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceReason {
    /// Upstream failed after retries.
    Unavailable,
    /// Upstream answered without the field.
    NotReported,
    /// Upstream sent a value that failed validation.
    Malformed,
}

/// A field that is either present with a usable value or absent with a reason.
///
/// Absent fields are never read as a real signal; [`Observed::or_zero`] exists
/// only for arithmetic accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum Observed<T> {
    /// Usable value.
    Present(T),
    /// No usable value.
    Absent(AbsenceReason),
}

impl<T> Observed<T> {
    /// Wrap an optional value, tagging `None` with `reason`.
    pub fn from_option(value: Option<T>, reason: AbsenceReason) -> Self {
        value.map_or(Self::Absent(reason), Self::Present)
    }

    /// Check whether a value is present.
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the value, if present.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent(_) => None,
        }
    }

    /// Get the absence reason, if absent.
    pub const fn absence(&self) -> Option<AbsenceReason> {
        match self {
            Self::Present(_) => None,
            Self::Absent(reason) => Some(*reason),
        }
    }

    /// Transform a present value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Observed<U> {
        match self {
            Self::Present(value) => Observed::Present(f(value)),
            Self::Absent(reason) => Observed::Absent(reason),
        }
    }
}

impl Observed<f64> {
    /// Wrap a float; non-finite values are [`AbsenceReason::Malformed`].
    pub fn finite(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Present(v),
            Some(_) => Self::Absent(AbsenceReason::Malformed),
            None => Self::Absent(AbsenceReason::NotReported),
        }
    }

    /// Copy of the value, if present.
    pub const fn get(&self) -> Option<f64> {
        match self {
            Self::Present(value) => Some(*value),
            Self::Absent(_) => None,
        }
    }

    /// The value, or 0 when absent.
    pub fn or_zero(&self) -> f64 {
        self.get().unwrap_or(0.0)
    }
}

impl<T> Default for Observed<T> {
    fn default() -> Self {
        Self::Absent(AbsenceReason::NotReported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_tags_absence() {
        assert_eq!(Observed::finite(Some(1.5)), Observed::Present(1.5));
        assert_eq!(
            Observed::finite(Some(f64::INFINITY)),
            Observed::Absent(AbsenceReason::Malformed)
        );
        assert_eq!(
            Observed::finite(None),
            Observed::Absent(AbsenceReason::NotReported)
        );
    }

    #[test]
    fn absent_reads_as_zero_only_for_accumulation() {
        let absent: Observed<f64> = Observed::Absent(AbsenceReason::Unavailable);
        assert!(!absent.is_present());
        assert!(absent.get().is_none());
        assert_eq!(absent.or_zero(), 0.0);
        assert_eq!(absent.absence(), Some(AbsenceReason::Unavailable));
    }

    #[test]
    fn observed_serde() {
        let json = serde_json::to_string(&Observed::Present(2.0)).unwrap();
        assert_eq!(json, r#"{"status":"present","value":2.0}"#);

        let json =
            serde_json::to_string(&Observed::<f64>::Absent(AbsenceReason::Malformed)).unwrap();
        assert_eq!(json, r#"{"status":"absent","value":"MALFORMED"}"#);
    }
}

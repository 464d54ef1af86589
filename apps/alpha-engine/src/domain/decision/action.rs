//! Decision value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::completeness::CompletenessGrade;
use super::reasons::ReasonCode;
use crate::domain::scoring::GateCode;
use crate::domain::shared::Ticker;

/// Trading action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Open a new position.
    Enter,
    /// Keep an incumbent.
    Maintain,
    /// Watch: degraded incumbent or non-qualifying candidate.
    Caution,
    /// Close an incumbent.
    Exit,
    /// Incumbent displaced by a stronger candidate.
    Replace,
}

impl Action {
    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "ENTER",
            Self::Maintain => "MAINTAIN",
            Self::Caution => "CAUTION",
            Self::Exit => "EXIT",
            Self::Replace => "REPLACE",
        }
    }

    /// Whether a previous-run record with this action still holds a slot.
    pub const fn holds_slot(self) -> bool {
        matches!(self, Self::Enter | Self::Maintain | Self::Caution)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence derived from data completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    /// Complete evidence.
    High,
    /// Advisory evidence.
    Medium,
    /// Thin evidence.
    Low,
}

impl From<CompletenessGrade> for Confidence {
    fn from(grade: CompletenessGrade) -> Self {
        match grade {
            CompletenessGrade::Gra => Self::High,
            CompletenessGrade::Grb => Self::Medium,
            CompletenessGrade::Grc => Self::Low,
        }
    }
}

/// Final per-ticker decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Action.
    pub action: Action,
    /// Confidence.
    pub confidence: Confidence,
    /// Human-readable reasons (Korean).
    #[serde(rename = "triggersKR")]
    pub triggers_kr: Vec<String>,
    /// Continuity boost applied to the comparison score.
    pub boost_amount: u8,
    /// Whether a boost was applied.
    pub is_boosted: bool,
    /// Typed reasons behind `triggers_kr`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_codes: Vec<ReasonCode>,
}

impl Decision {
    /// Build a decision and render its reasons.
    pub fn new(action: Action, confidence: Confidence, reasons: Vec<ReasonCode>, boost: u8) -> Self {
        Self {
            action,
            confidence,
            triggers_kr: reasons.iter().map(ReasonCode::render_kr).collect(),
            boost_amount: boost,
            is_boosted: boost > 0,
            reason_codes: reasons,
        }
    }
}

/// One ticker's standing from a run, carried into the next run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuityRecord {
    /// Ticker.
    pub ticker: Ticker,
    /// Rank among held tickers (1-based).
    pub rank: u32,
    /// Displayed final score.
    pub score: u8,
    /// Action taken.
    pub action: Action,
}

/// Scored ticker entering the decision stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Ticker.
    pub ticker: Ticker,
    /// Final (gated) score.
    pub score: u8,
    /// Fired gate codes.
    pub gates: Vec<GateCode>,
    /// Completeness grade.
    pub completeness: CompletenessGrade,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_serializes_with_triggers_kr() {
        let decision = Decision::new(Action::Maintain, Confidence::High, Vec::new(), 3);
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["action"], "MAINTAIN");
        assert_eq!(json["confidence"], "HIGH");
        assert_eq!(json["boostAmount"], 3);
        assert_eq!(json["isBoosted"], true);
        assert!(json["triggersKR"].is_array());
        assert!(json.get("reasonCodes").is_none());
    }

    #[test]
    fn confidence_from_completeness() {
        assert_eq!(Confidence::from(CompletenessGrade::Gra), Confidence::High);
        assert_eq!(Confidence::from(CompletenessGrade::Grb), Confidence::Medium);
        assert_eq!(Confidence::from(CompletenessGrade::Grc), Confidence::Low);
    }

    #[test]
    fn held_actions() {
        assert!(Action::Maintain.holds_slot());
        assert!(!Action::Exit.holds_slot());
        assert!(!Action::Replace.holds_slot());
    }
}

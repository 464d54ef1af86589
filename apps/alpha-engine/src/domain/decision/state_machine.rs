//! Decision State Machine
//!
//! Maps a candidate's final score, gates, completeness and incumbency to a
//! base action before slot competition.

use serde::{Deserialize, Serialize};

use super::action::{Action, Candidate};
use super::completeness::CompletenessGrade;
use super::reasons::ReasonCode;
use crate::domain::scoring::GateCode;

/// Decision thresholds and continuity parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionThresholds {
    /// Score a new candidate needs to enter.
    pub entry: u8,
    /// Score an incumbent needs to be maintained.
    pub maintain: u8,
    /// Below this an incumbent exits.
    pub exit_floor: u8,
    /// Margin a challenger must clear over an incumbent's comparison score.
    pub replace_margin: u8,
    /// Width of the near-replacement band that earns a boost.
    pub boost_band: u8,
    /// Largest continuity boost.
    pub max_boost: u8,
    /// Held positions.
    pub slots: usize,
    /// Gates that block entry and force exit.
    pub blocking_gates: Vec<GateCode>,
    /// Extra entry points required for GRB evidence.
    pub grb_entry_buffer: u8,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            entry: 70,
            maintain: 55,
            exit_floor: 40,
            replace_margin: 10,
            boost_band: 5,
            max_boost: 5,
            slots: 10,
            blocking_gates: vec![GateCode::FakePump],
            grb_entry_buffer: 5,
        }
    }
}

impl DecisionThresholds {
    /// Entry threshold for a completeness grade; `None` when entry is barred.
    pub fn entry_for(&self, grade: CompletenessGrade) -> Option<u8> {
        match grade {
            CompletenessGrade::Gra => Some(self.entry),
            CompletenessGrade::Grb => Some(self.entry.saturating_add(self.grb_entry_buffer)),
            CompletenessGrade::Grc => None,
        }
    }
}

/// Base action with its reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDecision {
    /// Action before slot competition.
    pub action: Action,
    /// Reasons.
    pub reasons: Vec<ReasonCode>,
}

/// Stateless decision rules.
pub struct DecisionStateMachine;

impl DecisionStateMachine {
    /// Decide the base action for one candidate.
    ///
    /// A qualifying new candidate is `ENTER` here; slot competition may still
    /// demote it to `CAUTION`.
    pub fn decide(
        candidate: &Candidate,
        incumbent: bool,
        thresholds: &DecisionThresholds,
    ) -> BaseDecision {
        let mut reasons: Vec<ReasonCode> = candidate
            .gates
            .iter()
            .filter(|g| !thresholds.blocking_gates.contains(*g))
            .map(|gate| ReasonCode::GateFired { gate: *gate })
            .collect();

        let blocking = candidate
            .gates
            .iter()
            .find(|g| thresholds.blocking_gates.contains(*g))
            .copied();
        let score = candidate.score;

        let action = if incumbent {
            Self::decide_incumbent(score, blocking, candidate.completeness, thresholds, &mut reasons)
        } else {
            Self::decide_new(score, blocking, candidate.completeness, thresholds, &mut reasons)
        };

        BaseDecision { action, reasons }
    }

    fn decide_new(
        score: u8,
        blocking: Option<GateCode>,
        completeness: CompletenessGrade,
        thresholds: &DecisionThresholds,
        reasons: &mut Vec<ReasonCode>,
    ) -> Action {
        if let Some(gate) = blocking {
            reasons.push(ReasonCode::BlockingGate { gate });
            return Action::Caution;
        }

        let Some(threshold) = thresholds.entry_for(completeness) else {
            reasons.push(ReasonCode::InsufficientData);
            return Action::Caution;
        };
        if completeness == CompletenessGrade::Grb {
            reasons.push(ReasonCode::AdvisoryEntryBuffer {
                buffer: thresholds.grb_entry_buffer,
            });
        }

        if score >= threshold {
            reasons.push(ReasonCode::EntryThresholdMet { score, threshold });
            Action::Enter
        } else {
            reasons.push(ReasonCode::BelowEntryThreshold { score, threshold });
            Action::Caution
        }
    }

    fn decide_incumbent(
        score: u8,
        blocking: Option<GateCode>,
        completeness: CompletenessGrade,
        thresholds: &DecisionThresholds,
        reasons: &mut Vec<ReasonCode>,
    ) -> Action {
        if let Some(gate) = blocking {
            reasons.push(ReasonCode::BlockingGate { gate });
            return Action::Exit;
        }

        if score >= thresholds.maintain {
            reasons.push(ReasonCode::MaintainThresholdMet {
                score,
                threshold: thresholds.maintain,
            });
            Action::Maintain
        } else if score >= thresholds.exit_floor {
            reasons.push(ReasonCode::Degraded {
                score,
                threshold: thresholds.maintain,
            });
            Action::Caution
        } else if completeness == CompletenessGrade::Grc {
            reasons.push(ReasonCode::BelowExitFloor {
                score,
                threshold: thresholds.exit_floor,
            });
            reasons.push(ReasonCode::ExitDeferred);
            Action::Caution
        } else {
            reasons.push(ReasonCode::BelowExitFloor {
                score,
                threshold: thresholds.exit_floor,
            });
            Action::Exit
        }
    }
}

//! Decision Bounded Context
//!
//! Turns a scored, gated ticker into a trading action:
//!
//! - [`completeness`]: GRA / GRB / GRC evidence grading
//! - [`state_machine`]: base action from score, gates and incumbency
//! - [`continuity`]: slot competition and the anti-churn boost
//! - [`reasons`]: typed reasons rendered as Korean text

pub mod action;
pub mod completeness;
pub mod continuity;
pub mod reasons;
pub mod state_machine;

pub use action::{Action, Candidate, Confidence, ContinuityRecord, Decision};
pub use completeness::{
    CompletenessGrade, CompletenessReport, GroupCompleteness, grade_completeness,
};
pub use continuity::{ContinuityBooster, ContinuityOutcome, IgnoredRecord};
pub use reasons::ReasonCode;
pub use state_machine::{BaseDecision, DecisionStateMachine, DecisionThresholds};

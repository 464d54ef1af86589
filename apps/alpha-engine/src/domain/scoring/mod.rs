//! Scoring Bounded Context
//!
//! Five independent pillars sum to a raw 0–100 score; the gate engine caps
//! or penalizes it, and the final score maps to a letter grade.

pub mod gates;
pub mod grade;
pub mod pillar;
pub mod pillars;
pub mod scorer;

pub use gates::{
    GateCode, GateEffect, GateEngine, GateOutcome, GateResult, GateThresholds, apply_gates,
};
pub use grade::Grade;
pub use pillar::{Factor, PillarName, PillarScore};
pub use scorer::{PillarScorer, PillarSet, PillarWeights};

//! Ticker Scorer
//!
//! Pure per-ticker pipeline over assembled evidence:
//! pillars → gates → grade → completeness. Holds no I/O, so batches can
//! run it on a rayon pool.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::decision::{Candidate, CompletenessReport, grade_completeness};
use crate::domain::evidence::Evidence;
use crate::domain::options_analytics::{OptionsAnalytics, SqueezeScore};
use crate::domain::scoring::{
    GateEngine, GateOutcome, GateThresholds, Grade, PillarScorer, PillarSet, PillarWeights,
};
use crate::domain::shared::Ticker;
use crate::domain::volatility_regime::VolatilityRegime;

/// Scored ticker before slot competition.
///
/// Decision-free, so it can be cached and reused across runs with different
/// continuity inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTicker {
    /// Ticker.
    pub ticker: Ticker,
    /// Session the evidence belongs to.
    pub as_of: NaiveDate,
    /// Pillar scores.
    pub pillars: PillarSet,
    /// Raw score, fired gates and final score.
    pub gates: GateOutcome,
    /// Letter grade of the final score.
    pub grade: Grade,
    /// Evidence completeness.
    pub completeness: CompletenessReport,
    /// Chain analytics.
    pub analytics: OptionsAnalytics,
    /// Squeeze score.
    pub squeeze: SqueezeScore,
    /// Volatility regime.
    pub regime: VolatilityRegime,
    /// Chain entries skipped as malformed.
    pub malformed_contracts: usize,
}

impl ScoredTicker {
    /// Final (gated) score.
    pub const fn score(&self) -> u8 {
        self.gates.final_score
    }

    /// Decision-stage view.
    pub fn candidate(&self) -> Candidate {
        Candidate {
            ticker: self.ticker.clone(),
            score: self.score(),
            gates: self.gates.codes(),
            completeness: self.completeness.grade,
        }
    }
}

/// Pillar scorer plus gate engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickerScorer {
    pillars: PillarScorer,
    gates: GateEngine,
}

impl TickerScorer {
    /// Create a scorer from pillar budgets and gate thresholds.
    pub const fn new(weights: PillarWeights, thresholds: GateThresholds) -> Self {
        Self {
            pillars: PillarScorer::new(weights),
            gates: GateEngine::new(thresholds),
        }
    }

    /// Score one ticker's evidence.
    pub fn score(&self, evidence: &Evidence) -> ScoredTicker {
        let pillars = self.pillars.score(evidence);
        let gates = self.gates.evaluate(pillars.raw_score(), evidence);
        let grade = Grade::from_score(gates.final_score);

        ScoredTicker {
            ticker: evidence.ticker.clone(),
            as_of: evidence.as_of,
            pillars,
            grade,
            gates,
            completeness: grade_completeness(evidence),
            analytics: evidence.analytics.clone(),
            squeeze: evidence.squeeze,
            regime: evidence.regime,
            malformed_contracts: evidence.malformed_contracts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::CompletenessGrade;
    use crate::domain::decision::completeness::fixtures::complete_evidence;
    use crate::domain::scoring::scorer::fixtures::empty_evidence;

    #[test]
    fn empty_evidence_scores_zero_and_grades_grc() {
        let scored = TickerScorer::default().score(&empty_evidence("AAPL"));

        assert_eq!(scored.score(), 0);
        assert_eq!(scored.grade, Grade::F);
        assert_eq!(scored.completeness.grade, CompletenessGrade::Grc);
        assert!(scored.gates.gates.is_empty());
    }

    #[test]
    fn final_score_is_gated_raw_sum() {
        let scored = TickerScorer::default().score(&complete_evidence("NVDA"));

        assert_eq!(scored.gates.raw_score, scored.pillars.raw_score());
        assert!(scored.score() <= scored.gates.raw_score);
        assert_eq!(scored.grade, Grade::from_score(scored.score()));
        assert_eq!(scored.completeness.grade, CompletenessGrade::Gra);
    }

    #[test]
    fn candidate_carries_gate_codes_and_completeness() {
        let scored = TickerScorer::default().score(&complete_evidence("NVDA"));
        let candidate = scored.candidate();

        assert_eq!(candidate.ticker, Ticker::new("NVDA"));
        assert_eq!(candidate.score, scored.score());
        assert_eq!(candidate.gates, scored.gates.codes());
        assert_eq!(candidate.completeness, CompletenessGrade::Gra);
    }
}

//! Pillar Scorer Domain Service

use serde::{Deserialize, Serialize};

use super::pillar::{PillarName, PillarScore};
use super::pillars;
use crate::domain::evidence::Evidence;

/// Pillar budgets. The defaults sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarWeights {
    /// Momentum budget.
    pub momentum: u8,
    /// Structure budget.
    pub structure: u8,
    /// Flow budget.
    pub flow: u8,
    /// Regime budget.
    pub regime: u8,
    /// Catalyst budget.
    pub catalyst: u8,
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            momentum: 25,
            structure: 25,
            flow: 20,
            regime: 15,
            catalyst: 15,
        }
    }
}

impl PillarWeights {
    /// Sum of all budgets.
    pub fn total(&self) -> u32 {
        [
            self.momentum,
            self.structure,
            self.flow,
            self.regime,
            self.catalyst,
        ]
        .iter()
        .map(|w| u32::from(*w))
        .sum()
    }
}

/// All five pillar scores for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarSet {
    /// Momentum pillar.
    pub momentum: PillarScore,
    /// Structure pillar.
    pub structure: PillarScore,
    /// Flow pillar.
    pub flow: PillarScore,
    /// Regime pillar.
    pub regime: PillarScore,
    /// Catalyst pillar.
    pub catalyst: PillarScore,
}

impl PillarSet {
    /// Pillars in scoring order.
    pub fn iter(&self) -> impl Iterator<Item = &PillarScore> {
        [
            &self.momentum,
            &self.structure,
            &self.flow,
            &self.regime,
            &self.catalyst,
        ]
        .into_iter()
    }

    /// Look up a pillar.
    pub const fn get(&self, name: PillarName) -> &PillarScore {
        match name {
            PillarName::Momentum => &self.momentum,
            PillarName::Structure => &self.structure,
            PillarName::Flow => &self.flow,
            PillarName::Regime => &self.regime,
            PillarName::Catalyst => &self.catalyst,
        }
    }

    /// Σ pillar scores, capped at 100.
    pub fn raw_score(&self) -> u8 {
        let sum: u32 = self.iter().map(|p| u32::from(p.score())).sum();
        sum.min(100) as u8
    }
}

/// Scores the five pillars from evidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PillarScorer {
    weights: PillarWeights,
}

impl PillarScorer {
    /// Create a scorer with the given budgets.
    pub const fn new(weights: PillarWeights) -> Self {
        Self { weights }
    }

    /// Score every pillar.
    pub fn score(&self, evidence: &Evidence) -> PillarSet {
        PillarSet {
            momentum: pillars::momentum::score(evidence, self.weights.momentum),
            structure: pillars::structure::score(evidence, self.weights.structure),
            flow: pillars::flow::score(evidence, self.weights.flow),
            regime: pillars::regime::score(evidence, self.weights.regime),
            catalyst: pillars::catalyst::score(evidence, self.weights.catalyst),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::domain::evidence::{
        Evidence, FlowEvidence, MacroEvidence, Observed, OptionsState, PriceEvidence,
        ShortEvidence,
    };
    use crate::domain::options_analytics::{OptionsAnalytics, SqueezeScore};
    use crate::domain::shared::Ticker;
    use crate::domain::volatility_regime::VolatilityRegime;

    /// Evidence with every field absent.
    pub fn empty_evidence(ticker: &str) -> Evidence {
        Evidence {
            ticker: Ticker::new(ticker),
            as_of: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            spot: Observed::default(),
            price: PriceEvidence::default(),
            options: OptionsState::Pending,
            flow: FlowEvidence::default(),
            macro_backdrop: MacroEvidence::default(),
            short: ShortEvidence::default(),
            malformed_contracts: 0,
            analytics: OptionsAnalytics::empty(),
            squeeze: SqueezeScore::default(),
            regime: VolatilityRegime::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::empty_evidence;
    use super::*;
    use crate::domain::evidence::Observed;

    #[test]
    fn default_weights_sum_to_100() {
        assert_eq!(PillarWeights::default().total(), 100);
    }

    #[test]
    fn empty_evidence_scores_zero() {
        let pillars = PillarScorer::default().score(&empty_evidence("AAPL"));
        assert_eq!(pillars.raw_score(), 0);
        assert!(!pillars.structure.missing_inputs().is_empty());
        for pillar in pillars.iter() {
            assert!(pillar.factors().iter().all(|f| f.value == 0));
        }
    }

    #[test]
    fn macro_only_scores_regime() {
        let mut evidence = empty_evidence("AAPL");
        evidence.macro_backdrop.index_change_pct = Observed::Present(0.6);
        evidence.macro_backdrop.volatility_index = Observed::Present(14.0);
        evidence.macro_backdrop.rate_proxy_change = Observed::Present(-0.01);
        evidence.macro_backdrop.dollar_index_change = Observed::Present(0.2);

        let pillars = PillarScorer::default().score(&evidence);
        assert_eq!(pillars.regime.score(), 5 + 5 + 3);
        assert_eq!(pillars.raw_score(), 13);
    }

    #[test]
    fn pillar_score_is_clamped_to_budget() {
        let mut evidence = empty_evidence("AAPL");
        evidence.price.last = Observed::Present(105.0);
        evidence.price.previous_close = Observed::Present(100.0);
        evidence.price.vwap = Observed::Present(100.0);

        let scorer = PillarScorer::new(PillarWeights {
            momentum: 10,
            ..PillarWeights::default()
        });
        let momentum = scorer.score(&evidence).momentum;
        let sum: u32 = momentum.factors().iter().map(|f| u32::from(f.value)).sum();
        assert_eq!(sum, 18);
        assert_eq!(momentum.score(), 10);
    }
}

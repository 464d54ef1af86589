//! Pillar and factor value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five scoring pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PillarName {
    /// Price momentum.
    Momentum,
    /// Options-market structure.
    Structure,
    /// Flow confirmation.
    Flow,
    /// Macro regime.
    Regime,
    /// Catalysts.
    Catalyst,
}

impl PillarName {
    /// All pillars in scoring order.
    pub const ALL: [Self; 5] = [
        Self::Momentum,
        Self::Structure,
        Self::Flow,
        Self::Regime,
        Self::Catalyst,
    ];

    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Momentum => "momentum",
            Self::Structure => "structure",
            Self::Flow => "flow",
            Self::Regime => "regime",
            Self::Catalyst => "catalyst",
        }
    }
}

impl fmt::Display for PillarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored factor inside a pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    /// Factor name.
    pub name: String,
    /// Points awarded.
    pub value: u8,
    /// Points available.
    pub max: u8,
    /// Input summary.
    pub detail: String,
}

impl Factor {
    /// Create a factor; `value` is capped at `max`.
    pub fn new(name: &str, value: u8, max: u8, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.min(max),
            max,
            detail: detail.into(),
        }
    }

    /// A factor whose inputs are absent: scores 0.
    pub fn missing(name: &str, max: u8) -> Self {
        Self::new(name, 0, max, "missing")
    }
}

/// Pillar sub-score.
///
/// `score == clamp(Σ factor.value, 0, max)` by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarScore {
    name: PillarName,
    score: u8,
    max: u8,
    factors: Vec<Factor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    missing_inputs: Vec<String>,
}

impl PillarScore {
    /// Build a pillar score from its factors.
    pub fn from_factors(
        name: PillarName,
        max: u8,
        factors: Vec<Factor>,
        missing_inputs: Vec<String>,
    ) -> Self {
        let sum: u32 = factors.iter().map(|f| u32::from(f.value)).sum();
        let score = sum.min(u32::from(max)) as u8;
        Self {
            name,
            score,
            max,
            factors,
            missing_inputs,
        }
    }

    /// Get the pillar name.
    pub const fn name(&self) -> PillarName {
        self.name
    }

    /// Get the score.
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Get the budget.
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Get the factors.
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Inputs that were absent while scoring.
    pub fn missing_inputs(&self) -> &[String] {
        &self.missing_inputs
    }

    /// Look up a factor by name.
    pub fn factor(&self, name: &str) -> Option<&Factor> {
        self.factors.iter().find(|f| f.name == name)
    }
}

/// Tracks absent inputs while a pillar is scored.
#[derive(Debug, Default)]
pub(crate) struct MissingInputs(Vec<String>);

impl MissingInputs {
    pub(crate) fn require<T>(&mut self, name: &str, value: Option<T>) -> Option<T> {
        if value.is_none() && !self.0.iter().any(|n| n == name) {
            self.0.push(name.to_string());
        }
        value
    }

    pub(crate) fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn factor_value_capped() {
        let factor = Factor::new("dayChange", 12, 10, "chg 5.00%");
        assert_eq!(factor.value, 10);
        assert_eq!(Factor::missing("vwapPosition", 8).value, 0);
    }

    #[test]
    fn missing_inputs_dedupe() {
        let mut missing = MissingInputs::default();
        assert_eq!(missing.require("last", None::<f64>), None);
        assert_eq!(missing.require("last", None::<f64>), None);
        assert_eq!(missing.require("vwap", Some(1.0)), Some(1.0));
        assert_eq!(missing.into_inner(), vec!["last".to_string()]);
    }

    #[test]
    fn pillar_name_serde() {
        assert_eq!(serde_json::to_string(&PillarName::Catalyst).unwrap(), "\"catalyst\"");
    }

    proptest! {
        #[test]
        fn score_is_clamped_sum(values in prop::collection::vec(0u8..=30, 0..6), max in 0u8..=40) {
            let factors: Vec<Factor> = values
                .iter()
                .enumerate()
                .map(|(i, v)| Factor::new(&format!("f{i}"), *v, 30, ""))
                .collect();
            let sum: u32 = factors.iter().map(|f| u32::from(f.value)).sum();
            let pillar = PillarScore::from_factors(PillarName::Flow, max, factors, Vec::new());
            prop_assert_eq!(u32::from(pillar.score()), sum.min(u32::from(max)));
            prop_assert!(pillar.score() <= pillar.max());
        }
    }
}

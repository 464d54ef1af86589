//! Scoring configuration: pillar budgets, gate thresholds, decision rules.
//!
//! Defaults mirror the domain defaults; the config layer only renames keys
//! to snake_case YAML.

use serde::{Deserialize, Serialize};

use crate::domain::decision::DecisionThresholds;
use crate::domain::options_analytics::ATM_BAND;
use crate::domain::scoring::{GateCode, GateThresholds, PillarWeights};

/// Scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Pillar budgets (must sum to 100).
    #[serde(default)]
    pub pillars: PillarBudgets,
    /// Gate thresholds and effects.
    #[serde(default)]
    pub gates: GatesConfig,
    /// Decision thresholds and continuity parameters.
    #[serde(default)]
    pub decision: DecisionConfig,
    /// Entries in the Top-N summary.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// ATM band as a fraction of spot.
    #[serde(default = "default_atm_band")]
    pub atm_band: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pillars: PillarBudgets::default(),
            gates: GatesConfig::default(),
            decision: DecisionConfig::default(),
            top_n: default_top_n(),
            atm_band: default_atm_band(),
        }
    }
}

/// Pillar budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PillarBudgets {
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

impl Default for PillarBudgets {
    fn default() -> Self {
        let w = PillarWeights::default();
        Self {
            momentum: w.momentum,
            structure: w.structure,
            flow: w.flow,
            regime: w.regime,
            catalyst: w.catalyst,
        }
    }
}

impl PillarBudgets {
    /// Domain pillar weights.
    #[must_use]
    pub const fn to_weights(&self) -> PillarWeights {
        PillarWeights {
            momentum: self.momentum,
            structure: self.structure,
            flow: self.flow,
            regime: self.regime,
            catalyst: self.catalyst,
        }
    }
}

/// Gate thresholds and effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatesConfig {
    /// WALL_REJECTION: max call-wall distance above spot, percent.
    pub wall_rejection_distance_pct: f64,
    /// WALL_REJECTION cap.
    pub wall_rejection_cap: u8,
    /// FAKE_PUMP: day change that counts as a pump, percent.
    pub fake_pump_change_pct: f64,
    /// FAKE_PUMP cap.
    pub fake_pump_cap: u8,
    /// SHORT_STORM: squeeze score that arms the gate.
    pub short_storm_squeeze: u8,
    /// SHORT_STORM penalty.
    pub short_storm_penalty: u8,
    /// ratioOPI at which flow confirms.
    pub confirm_ratio_opi: f64,
    /// Dark-pool percent at which flow confirms.
    pub confirm_dark_pool_pct: f64,
}

impl Default for GatesConfig {
    fn default() -> Self {
        let g = GateThresholds::default();
        Self {
            wall_rejection_distance_pct: g.wall_rejection_distance_pct,
            wall_rejection_cap: g.wall_rejection_cap,
            fake_pump_change_pct: g.fake_pump_change_pct,
            fake_pump_cap: g.fake_pump_cap,
            short_storm_squeeze: g.short_storm_squeeze,
            short_storm_penalty: g.short_storm_penalty,
            confirm_ratio_opi: g.confirm_ratio_opi,
            confirm_dark_pool_pct: g.confirm_dark_pool_pct,
        }
    }
}

impl GatesConfig {
    /// Domain gate thresholds.
    #[must_use]
    pub const fn to_thresholds(&self) -> GateThresholds {
        GateThresholds {
            wall_rejection_distance_pct: self.wall_rejection_distance_pct,
            wall_rejection_cap: self.wall_rejection_cap,
            fake_pump_change_pct: self.fake_pump_change_pct,
            fake_pump_cap: self.fake_pump_cap,
            short_storm_squeeze: self.short_storm_squeeze,
            short_storm_penalty: self.short_storm_penalty,
            confirm_ratio_opi: self.confirm_ratio_opi,
            confirm_dark_pool_pct: self.confirm_dark_pool_pct,
        }
    }
}

/// Decision thresholds and continuity parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Entry threshold.
    pub entry_threshold: u8,
    /// Maintenance threshold.
    pub maintain_threshold: u8,
    /// Exit floor.
    pub exit_floor: u8,
    /// Replacement margin.
    pub replace_margin: u8,
    /// Near-replacement band earning a boost.
    pub boost_band: u8,
    /// Largest continuity boost.
    pub max_boost: u8,
    /// Held positions.
    pub slots: usize,
    /// Gate codes that block entry and force exit.
    pub blocking_gates: Vec<String>,
    /// Extra entry points for GRB evidence.
    pub grb_entry_buffer: u8,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        let d = DecisionThresholds::default();
        Self {
            entry_threshold: d.entry,
            maintain_threshold: d.maintain,
            exit_floor: d.exit_floor,
            replace_margin: d.replace_margin,
            boost_band: d.boost_band,
            max_boost: d.max_boost,
            slots: d.slots,
            blocking_gates: d
                .blocking_gates
                .iter()
                .map(|g| g.as_str().to_string())
                .collect(),
            grb_entry_buffer: d.grb_entry_buffer,
        }
    }
}

impl DecisionConfig {
    /// Blocking gate codes that do not name a known gate.
    pub fn unknown_blocking_gates(&self) -> Vec<&str> {
        self.blocking_gates
            .iter()
            .map(String::as_str)
            .filter(|code| GateCode::parse(code).is_none())
            .collect()
    }

    /// Domain decision thresholds. Unknown gate codes are skipped; validation
    /// rejects them before this is reached.
    #[must_use]
    pub fn to_thresholds(&self) -> DecisionThresholds {
        DecisionThresholds {
            entry: self.entry_threshold,
            maintain: self.maintain_threshold,
            exit_floor: self.exit_floor,
            replace_margin: self.replace_margin,
            boost_band: self.boost_band,
            max_boost: self.max_boost,
            slots: self.slots,
            blocking_gates: self
                .blocking_gates
                .iter()
                .filter_map(|code| GateCode::parse(code))
                .collect(),
            grb_entry_buffer: self.grb_entry_buffer,
        }
    }
}

const fn default_top_n() -> usize {
    5
}

const fn default_atm_band() -> f64 {
    ATM_BAND
}

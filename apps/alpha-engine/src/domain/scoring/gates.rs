//! Gate Engine Domain Service
//!
//! Fixed, ordered risk overrides on the raw pillar sum:
//!
//! 1. `WALL_REJECTION` caps the score when price presses the call wall
//!    without confirming flow.
//! 2. `FAKE_PUMP` caps the score when a rally has no flow confirmation.
//! 3. `SHORT_STORM` penalizes high squeeze risk with bearish gamma structure.
//!
//! Caps apply before penalties:
//! `final = clamp(min(raw, caps…) − Σ penalties, 0, 100)`.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::evidence::Evidence;

/// Gate trigger codes in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateCode {
    /// Price pressing the call wall without confirming flow.
    WallRejection,
    /// Day gain without flow confirmation.
    FakePump,
    /// Squeeze risk under bearish gamma structure.
    ShortStorm,
}

impl GateCode {
    /// Wire code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WallRejection => "WALL_REJECTION",
            Self::FakePump => "FAKE_PUMP",
            Self::ShortStorm => "SHORT_STORM",
        }
    }

    /// Parse a wire code.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "WALL_REJECTION" => Some(Self::WallRejection),
            "FAKE_PUMP" => Some(Self::FakePump),
            "SHORT_STORM" => Some(Self::ShortStorm),
            _ => None,
        }
    }
}

impl fmt::Display for GateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a gate modifies the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateEffect {
    /// Upper bound on the score.
    Cap,
    /// Points subtracted after caps.
    Penalty,
}

/// One fired gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateResult {
    /// Trigger code.
    pub code: GateCode,
    /// Cap or penalty.
    pub effect: GateEffect,
    /// Cap level or penalty points.
    pub applied_value: u8,
}

/// Gate thresholds and effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateThresholds {
    /// Max distance (percent of spot) from spot up to the call wall.
    pub wall_rejection_distance_pct: f64,
    /// WALL_REJECTION cap.
    pub wall_rejection_cap: u8,
    /// Day change (percent) that counts as a pump.
    pub fake_pump_change_pct: f64,
    /// FAKE_PUMP cap.
    pub fake_pump_cap: u8,
    /// Squeeze score that arms SHORT_STORM.
    pub short_storm_squeeze: u8,
    /// SHORT_STORM penalty.
    pub short_storm_penalty: u8,
    /// ratioOPI at which flow confirms.
    pub confirm_ratio_opi: f64,
    /// Dark-pool percent at which flow confirms.
    pub confirm_dark_pool_pct: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            wall_rejection_distance_pct: 1.0,
            wall_rejection_cap: 55,
            fake_pump_change_pct: 1.5,
            fake_pump_cap: 45,
            short_storm_squeeze: 45,
            short_storm_penalty: 10,
            confirm_ratio_opi: 20.0,
            confirm_dark_pool_pct: 45.0,
        }
    }
}

/// Raw score, fired gates and the resulting final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateOutcome {
    /// Σ pillar scores before gates.
    pub raw_score: u8,
    /// Score after caps and penalties.
    pub final_score: u8,
    /// Fired gates, priority order, no duplicates.
    pub gates: Vec<GateResult>,
}

impl GateOutcome {
    /// Fired gate codes.
    pub fn codes(&self) -> Vec<GateCode> {
        self.gates.iter().map(|g| g.code).collect()
    }

    /// Check whether a gate fired.
    pub fn fired(&self, code: GateCode) -> bool {
        self.gates.iter().any(|g| g.code == code)
    }
}

/// Apply gate effects to a raw score.
///
/// Duplicate codes are collapsed, so applying the same list twice is the same
/// as applying it once.
pub fn apply_gates(raw: u8, gates: &[GateResult]) -> u8 {
    let mut seen: Vec<GateCode> = Vec::with_capacity(gates.len());
    let mut capped = i32::from(raw.min(100));
    let mut penalty = 0i32;

    let unique = gates.iter().filter(|g| {
        if seen.contains(&g.code) {
            false
        } else {
            seen.push(g.code);
            true
        }
    });
    let (caps, penalties): (Vec<&GateResult>, Vec<&GateResult>) =
        unique.partition(|g| g.effect == GateEffect::Cap);

    for cap in caps {
        capped = capped.min(i32::from(cap.applied_value));
    }
    for p in penalties {
        penalty += i32::from(p.applied_value);
    }

    (capped - penalty).clamp(0, 100) as u8
}

/// Evaluates the ordered gate rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateEngine {
    thresholds: GateThresholds,
}

impl GateEngine {
    /// Create an engine with the given thresholds.
    pub const fn new(thresholds: GateThresholds) -> Self {
        Self { thresholds }
    }

    /// Get the thresholds.
    pub const fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }

    /// Flow confirms when ratioOPI or dark-pool share clears its threshold.
    ///
    /// Absent fields never confirm.
    pub fn flow_confirms(&self, evidence: &Evidence) -> bool {
        let t = &self.thresholds;
        evidence
            .flow
            .ratio_opi
            .get()
            .is_some_and(|r| r >= t.confirm_ratio_opi)
            || evidence
                .flow
                .dark_pool_pct
                .get()
                .is_some_and(|d| d >= t.confirm_dark_pool_pct)
    }

    fn wall_rejection(&self, evidence: &Evidence, confirms: bool) -> bool {
        if confirms {
            return false;
        }
        let (Some(spot), Some(wall)) = (
            evidence.spot_price(),
            evidence.analytics.walls.call_wall.and_then(|w| w.to_f64()),
        ) else {
            return false;
        };
        let distance = (wall - spot) / spot * 100.0;
        (0.0..=self.thresholds.wall_rejection_distance_pct).contains(&distance)
    }

    fn fake_pump(&self, evidence: &Evidence, confirms: bool) -> bool {
        !confirms
            && evidence
                .price
                .day_change_pct()
                .is_some_and(|chg| chg >= self.thresholds.fake_pump_change_pct)
    }

    fn short_storm(&self, evidence: &Evidence) -> bool {
        let squeeze = evidence.short.squeeze_inputs();
        let has_short_data = squeeze.short_interest_pct.is_some()
            || squeeze.days_to_cover.is_some()
            || squeeze.short_interest_delta.is_some()
            || squeeze.short_volume_pct.is_some();
        if !has_short_data || evidence.squeeze.score < self.thresholds.short_storm_squeeze {
            return false;
        }
        if !evidence.options.is_ready() || evidence.analytics.is_empty() {
            return false;
        }

        let gamma = evidence.analytics.gamma;
        match (gamma.flip_level, evidence.spot_price()) {
            (Some(flip), Some(spot)) => spot < flip,
            (None, _) => gamma.net_gex < 0.0,
            (Some(_), None) => false,
        }
    }

    /// Detect fired gates for `evidence` and apply them to `raw`.
    pub fn evaluate(&self, raw: u8, evidence: &Evidence) -> GateOutcome {
        let t = &self.thresholds;
        let confirms = self.flow_confirms(evidence);
        let mut gates = Vec::new();

        if self.wall_rejection(evidence, confirms) {
            gates.push(GateResult {
                code: GateCode::WallRejection,
                effect: GateEffect::Cap,
                applied_value: t.wall_rejection_cap,
            });
        }
        if self.fake_pump(evidence, confirms) {
            gates.push(GateResult {
                code: GateCode::FakePump,
                effect: GateEffect::Cap,
                applied_value: t.fake_pump_cap,
            });
        }
        if self.short_storm(evidence) {
            gates.push(GateResult {
                code: GateCode::ShortStorm,
                effect: GateEffect::Penalty,
                applied_value: t.short_storm_penalty,
            });
        }

        GateOutcome {
            raw_score: raw,
            final_score: apply_gates(raw, &gates),
            gates,
        }
    }
}

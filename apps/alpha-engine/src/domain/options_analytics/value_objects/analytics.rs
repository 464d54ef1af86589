//! Derived analytics value objects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net and total gamma exposure with the estimated flip level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaExposure {
    /// Signed sum of contributions (calls +, puts −).
    pub net_gex: f64,
    /// Sum of absolute contributions.
    pub total_gamma: f64,
    /// Underlying price where cumulative signed GEX crosses zero.
    pub flip_level: Option<f64>,
}

impl GammaExposure {
    /// Dealers are net short gamma.
    #[must_use]
    pub fn is_short_gamma(&self) -> bool {
        self.net_gex < 0.0
    }
}

/// Gamma concentration label for the reference expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConcentrationLabel {
    /// ≥70% of gamma pinned ATM.
    Sticky,
    /// ≥50%.
    Elevated,
    /// ≥30%.
    Normal,
    /// Below 30%.
    #[default]
    Low,
}

impl ConcentrationLabel {
    /// Classify an ATM concentration percentage.
    #[must_use]
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 70.0 {
            Self::Sticky
        } else if pct >= 50.0 {
            Self::Elevated
        } else if pct >= 30.0 {
            Self::Normal
        } else {
            Self::Low
        }
    }
}

/// ATM gamma concentration of the nearest expiry bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaConcentration {
    /// Reference expiry, if any bucket exists.
    pub expiration_date: Option<NaiveDate>,
    /// Days to the reference expiry.
    pub dte: Option<i64>,
    /// Percent of the bucket's gamma within the ATM band.
    pub atm_concentration_pct: f64,
    /// Label derived from the percentage.
    pub label: ConcentrationLabel,
}

/// Max-pain settlement strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxPain {
    /// Strike minimizing aggregate writer payout.
    pub strike: Decimal,
    /// Aggregate payout at that strike.
    pub pain: Decimal,
}

/// Short-interest inputs to the squeeze score. Absent inputs contribute 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqueezeInputs {
    /// Short interest as percent of float.
    pub short_interest_pct: Option<f64>,
    /// Days to cover.
    pub days_to_cover: Option<f64>,
    /// Change in short interest, percentage points.
    pub short_interest_delta: Option<f64>,
    /// Short volume as percent of total volume.
    pub short_volume_pct: Option<f64>,
}

/// Squeeze risk status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqueezeStatus {
    /// ≥70.
    Critical,
    /// ≥45.
    High,
    /// ≥20.
    Medium,
    /// Below 20.
    #[default]
    Low,
}

impl SqueezeStatus {
    /// Classify a squeeze score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            Self::Critical
        } else if score >= 45 {
            Self::High
        } else if score >= 20 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Additive 0–100 squeeze risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SqueezeScore {
    /// Score in [0, 100].
    pub score: u8,
    /// Status label.
    pub status: SqueezeStatus,
}

/// Options-pressure index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPressure {
    /// Σ delta × OI over calls with positive delta.
    pub call_pressure: f64,
    /// Σ |delta| × OI over puts with negative delta.
    pub put_pressure: f64,
    /// callPressure − putPressure.
    pub raw: f64,
    /// Bounded ratio form in [−100, 100].
    pub ratio: f64,
}

/// Open-interest walls around spot in the reference expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionWalls {
    /// Largest call OI strike at or above spot.
    pub call_wall: Option<Decimal>,
    /// Largest put OI strike at or below spot.
    pub put_wall: Option<Decimal>,
}

/// Everything derived from one chain snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsAnalytics {
    /// Unexpired contracts that fed the analytics.
    pub contracts_used: usize,
    /// Gamma exposure across all unexpired contracts.
    pub gamma: GammaExposure,
    /// Concentration of the nearest expiry.
    pub concentration: GammaConcentration,
    /// Max pain of the nearest expiry.
    pub max_pain: Option<MaxPain>,
    /// Options-pressure index across all unexpired contracts.
    pub pressure: OptionsPressure,
    /// OI walls of the nearest expiry.
    pub walls: OptionWalls,
    /// Mean ATM implied volatility (percent) in the nearest expiry.
    pub atm_iv_pct: Option<f64>,
    /// Call-side day volume.
    pub call_volume: u64,
    /// Put-side day volume.
    pub put_volume: u64,
    /// Total open interest.
    pub total_open_interest: u64,
}

impl OptionsAnalytics {
    /// Zero-filled analytics for an empty or missing chain.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// No contracts contributed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contracts_used == 0
    }

    /// Call/put day-volume ratio.
    ///
    /// `None` when no puts traded (the ratio is undefined).
    #[must_use]
    pub fn call_put_volume_ratio(&self) -> Option<f64> {
        if self.put_volume == 0 {
            return None;
        }
        Some(self.call_volume as f64 / self.put_volume as f64)
    }

    /// Total day volume over total open interest.
    #[must_use]
    pub fn unusual_activity_ratio(&self) -> Option<f64> {
        if self.total_open_interest == 0 {
            return None;
        }
        Some((self.call_volume + self.put_volume) as f64 / self.total_open_interest as f64)
    }
}

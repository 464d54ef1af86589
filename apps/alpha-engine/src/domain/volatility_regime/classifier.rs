//! Volatility regime classifier.

use serde::{Deserialize, Serialize};

use crate::domain::options_analytics::{OptionsAnalytics, SqueezeScore};

/// Four-state volatility regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeLabel {
    /// Score ≥ 75.
    Erupting,
    /// Score ≥ 50.
    Loaded,
    /// Score ≥ 25.
    Coiling,
    /// Below 25.
    #[default]
    Calm,
}

impl RegimeLabel {
    /// Classify a regime score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 75 {
            Self::Erupting
        } else if score >= 50 {
            Self::Loaded
        } else if score >= 25 {
            Self::Coiling
        } else {
            Self::Calm
        }
    }
}

/// Per-component contributions to the regime score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComponents {
    /// 0–30.
    pub short_gamma: f64,
    /// 0–25.
    pub squeeze: f64,
    /// 0–20.
    pub implied_volatility: f64,
    /// 0–15.
    pub flip_proximity: f64,
    /// 0–10.
    pub concentration: f64,
}

impl RegimeComponents {
    fn total(&self) -> f64 {
        self.short_gamma
            + self.squeeze
            + self.implied_volatility
            + self.flip_proximity
            + self.concentration
    }
}

/// Regime score and label.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityRegime {
    /// Capped score in [0, 100].
    pub score: u8,
    /// Label derived from the score.
    pub label: RegimeLabel,
    /// Contributions behind the score.
    pub components: RegimeComponents,
}

fn short_gamma_points(analytics: &OptionsAnalytics) -> f64 {
    let gamma = analytics.gamma;
    if gamma.net_gex < 0.0 && gamma.total_gamma > 0.0 {
        (gamma.net_gex.abs() / gamma.total_gamma * 30.0).min(30.0)
    } else {
        0.0
    }
}

fn iv_points(atm_iv_pct: Option<f64>) -> f64 {
    match atm_iv_pct {
        Some(iv) if iv > 50.0 => 20.0,
        Some(iv) if iv > 35.0 => 12.0,
        Some(iv) if iv > 25.0 => 6.0,
        _ => 0.0,
    }
}

fn flip_points(flip: Option<f64>, spot: f64) -> f64 {
    let Some(flip) = flip else {
        return 0.0;
    };
    if spot <= 0.0 {
        return 0.0;
    }
    let distance_pct = (spot - flip).abs() / spot * 100.0;
    if distance_pct < 1.0 {
        15.0
    } else if distance_pct < 3.0 {
        10.0
    } else if distance_pct < 5.0 {
        5.0
    } else {
        0.0
    }
}

fn concentration_points(pct: f64) -> f64 {
    if pct >= 70.0 {
        10.0
    } else if pct >= 50.0 {
        6.0
    } else if pct >= 30.0 {
        3.0
    } else {
        0.0
    }
}

/// Classify the volatility regime of one underlying.
#[must_use]
pub fn classify(analytics: &OptionsAnalytics, squeeze: SqueezeScore, spot: f64) -> VolatilityRegime {
    let components = RegimeComponents {
        short_gamma: short_gamma_points(analytics),
        squeeze: (f64::from(squeeze.score) / 4.0).min(25.0),
        implied_volatility: iv_points(analytics.atm_iv_pct),
        flip_proximity: flip_points(analytics.gamma.flip_level, spot),
        concentration: concentration_points(analytics.concentration.atm_concentration_pct),
    };

    let score = components.total().round().clamp(0.0, 100.0) as u8;
    VolatilityRegime {
        score,
        label: RegimeLabel::from_score(score),
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options_analytics::{GammaConcentration, GammaExposure, SqueezeStatus};
    use test_case::test_case;

    fn analytics(net: f64, total: f64, flip: Option<f64>, iv: Option<f64>, conc: f64) -> OptionsAnalytics {
        OptionsAnalytics {
            contracts_used: 10,
            gamma: GammaExposure {
                net_gex: net,
                total_gamma: total,
                flip_level: flip,
            },
            concentration: GammaConcentration {
                atm_concentration_pct: conc,
                ..GammaConcentration::default()
            },
            atm_iv_pct: iv,
            ..OptionsAnalytics::default()
        }
    }

    fn squeeze(score: u8) -> SqueezeScore {
        SqueezeScore {
            score,
            status: SqueezeStatus::from_score(score),
        }
    }

    #[test]
    fn empty_analytics_is_calm() {
        let regime = classify(&OptionsAnalytics::empty(), squeeze(0), 100.0);
        assert_eq!(regime.score, 0);
        assert_eq!(regime.label, RegimeLabel::Calm);
    }

    #[test]
    fn everything_maxed_erupts() {
        let a = analytics(-1_000.0, 1_000.0, Some(100.5), Some(60.0), 80.0);
        let regime = classify(&a, squeeze(100), 100.0);
        // 30 + 25 + 20 + 15 + 10
        assert_eq!(regime.score, 100);
        assert_eq!(regime.label, RegimeLabel::Erupting);
    }

    #[test]
    fn long_gamma_contributes_nothing() {
        let a = analytics(1_000.0, 1_000.0, None, None, 0.0);
        assert_eq!(classify(&a, squeeze(0), 100.0).components.short_gamma, 0.0);
    }

    #[test]
    fn partial_short_gamma_scales() {
        let a = analytics(-500.0, 1_000.0, None, Some(40.0), 55.0);
        let regime = classify(&a, squeeze(48), 100.0);
        // 15 + 12 + 12 + 0 + 6
        assert_eq!(regime.score, 45);
        assert_eq!(regime.label, RegimeLabel::Coiling);
    }

    #[test_case(100.2 => 15.0)]
    #[test_case(102.0 => 10.0)]
    #[test_case(96.0 => 5.0)]
    #[test_case(90.0 => 0.0)]
    fn flip_proximity(flip: f64) -> f64 {
        flip_points(Some(flip), 100.0)
    }

    #[test_case(75 => RegimeLabel::Erupting)]
    #[test_case(50 => RegimeLabel::Loaded)]
    #[test_case(25 => RegimeLabel::Coiling)]
    #[test_case(24 => RegimeLabel::Calm)]
    fn regime_label(score: u8) -> RegimeLabel {
        RegimeLabel::from_score(score)
    }
}

//! Catalyst pillar: squeeze risk, unusual options activity, volatility regime.

use super::tier_at_least;
use crate::domain::evidence::Evidence;
use crate::domain::scoring::pillar::{Factor, MissingInputs, PillarName, PillarScore};
use crate::domain::volatility_regime::RegimeLabel;

fn squeeze_points(score: u8) -> u8 {
    tier_at_least(f64::from(score), &[(70.0, 6), (45.0, 4), (20.0, 2)])
}

fn unusual_points(volume_to_oi: f64) -> u8 {
    tier_at_least(volume_to_oi, &[(0.5, 5), (0.25, 3), (0.1, 1)])
}

const fn regime_points(label: RegimeLabel) -> u8 {
    match label {
        RegimeLabel::Erupting => 4,
        RegimeLabel::Loaded => 3,
        RegimeLabel::Coiling => 1,
        RegimeLabel::Calm => 0,
    }
}

/// Score the catalyst pillar.
pub fn score(evidence: &Evidence, max: u8) -> PillarScore {
    let short = &evidence.short;
    let mut missing = MissingInputs::default();

    let any_short = [
        short.short_interest_pct,
        short.days_to_cover,
        short.short_interest_delta,
        short.short_volume_pct,
    ]
    .iter()
    .any(|field| field.is_present());

    let squeeze = missing
        .require("shortInterest", any_short.then_some(evidence.squeeze))
        .map_or_else(
            || Factor::missing("squeezeRisk", 6),
            |squeeze| {
                Factor::new(
                    "squeezeRisk",
                    squeeze_points(squeeze.score),
                    6,
                    format!("squeeze {} ({:?})", squeeze.score, squeeze.status),
                )
            },
        );

    let unusual = missing
        .require("optionsVolume", evidence.analytics.unusual_activity_ratio())
        .map_or_else(
            || Factor::missing("unusualOptions", 5),
            |ratio| Factor::new("unusualOptions", unusual_points(ratio), 5, format!("vol/OI {ratio:.2}")),
        );

    let regime = evidence.regime;
    let volatility_regime = Factor::new(
        "volatilityRegime",
        regime_points(regime.label),
        4,
        format!("{:?} ({})", regime.label, regime.score),
    );

    PillarScore::from_factors(
        PillarName::Catalyst,
        max,
        vec![squeeze, unusual, volatility_regime],
        missing.into_inner(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(70 => 6)]
    #[test_case(45 => 4)]
    #[test_case(20 => 2)]
    #[test_case(19 => 0)]
    fn squeeze_risk(score: u8) -> u8 {
        squeeze_points(score)
    }

    #[test_case(0.5 => 5)]
    #[test_case(0.3 => 3)]
    #[test_case(0.1 => 1)]
    #[test_case(0.05 => 0)]
    fn unusual_options(ratio: f64) -> u8 {
        unusual_points(ratio)
    }

    #[test]
    fn regime_points_by_label() {
        assert_eq!(regime_points(RegimeLabel::Erupting), 4);
        assert_eq!(regime_points(RegimeLabel::Loaded), 3);
        assert_eq!(regime_points(RegimeLabel::Coiling), 1);
        assert_eq!(regime_points(RegimeLabel::Calm), 0);
    }
}

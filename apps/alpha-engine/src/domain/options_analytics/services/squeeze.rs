//! Squeeze risk score.

use crate::domain::options_analytics::value_objects::{SqueezeInputs, SqueezeScore, SqueezeStatus};

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn short_interest_points(pct: f64) -> u8 {
    if pct >= 20.0 {
        40
    } else if pct >= 10.0 {
        25
    } else if pct >= 5.0 {
        10
    } else {
        0
    }
}

fn days_to_cover_points(days: f64) -> u8 {
    if days >= 5.0 {
        25
    } else if days >= 3.0 {
        15
    } else if days >= 2.0 {
        8
    } else {
        0
    }
}

fn delta_points(delta: f64) -> u8 {
    if delta > 5.0 {
        15
    } else if delta > 0.0 {
        8
    } else {
        0
    }
}

fn short_volume_points(pct: f64) -> u8 {
    if pct >= 50.0 {
        20
    } else if pct >= 40.0 {
        10
    } else if pct >= 30.0 {
        5
    } else {
        0
    }
}

/// Additive squeeze risk score in [0, 100].
///
/// Each absent or non-finite input contributes 0.
#[must_use]
pub fn squeeze_score(inputs: &SqueezeInputs) -> SqueezeScore {
    let total = finite(inputs.short_interest_pct).map_or(0, short_interest_points)
        + finite(inputs.days_to_cover).map_or(0, days_to_cover_points)
        + finite(inputs.short_interest_delta).map_or(0, delta_points)
        + finite(inputs.short_volume_pct).map_or(0, short_volume_points);

    let score = total.min(100);
    SqueezeScore {
        score,
        status: SqueezeStatus::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn inputs(si: f64, dtc: f64, delta: f64, sv: f64) -> SqueezeInputs {
        SqueezeInputs {
            short_interest_pct: Some(si),
            days_to_cover: Some(dtc),
            short_interest_delta: Some(delta),
            short_volume_pct: Some(sv),
        }
    }

    #[test_case(25.0, 6.0, 8.0, 55.0 => 100 ; "every input maxed")]
    #[test_case(12.0, 3.5, 1.0, 42.0 => 58 ; "mid tier")]
    #[test_case(5.0, 2.0, 0.0, 30.0 => 23 ; "lower bounds inclusive")]
    #[test_case(4.9, 1.9, -1.0, 29.9 => 0 ; "below every tier")]
    fn squeeze_tiers(si: f64, dtc: f64, delta: f64, sv: f64) -> u8 {
        squeeze_score(&inputs(si, dtc, delta, sv)).score
    }

    #[test]
    fn absent_inputs_contribute_zero() {
        let result = squeeze_score(&SqueezeInputs::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.status, SqueezeStatus::Low);

        let partial = SqueezeInputs {
            short_interest_pct: Some(22.0),
            days_to_cover: Some(f64::NAN),
            ..SqueezeInputs::default()
        };
        assert_eq!(squeeze_score(&partial).score, 40);
    }

    #[test]
    fn status_follows_score() {
        assert_eq!(squeeze_score(&inputs(25.0, 6.0, 8.0, 55.0)).status, SqueezeStatus::Critical);
        assert_eq!(squeeze_score(&inputs(12.0, 3.5, 1.0, 42.0)).status, SqueezeStatus::High);
    }

    proptest! {
        #[test]
        fn squeeze_bounded(
            si in -10.0f64..200.0,
            dtc in -5.0f64..50.0,
            delta in -50.0f64..50.0,
            sv in -10.0f64..150.0,
        ) {
            let score = squeeze_score(&inputs(si, dtc, delta, sv)).score;
            prop_assert!(score <= 100);
        }

        #[test]
        fn squeeze_monotone(
            si in 0.0f64..50.0,
            dtc in 0.0f64..10.0,
            delta in -10.0f64..10.0,
            sv in 0.0f64..80.0,
            bump in 0.0f64..20.0,
        ) {
            let base = squeeze_score(&inputs(si, dtc, delta, sv)).score;
            prop_assert!(squeeze_score(&inputs(si + bump, dtc, delta, sv)).score >= base);
            prop_assert!(squeeze_score(&inputs(si, dtc + bump, delta, sv)).score >= base);
            prop_assert!(squeeze_score(&inputs(si, dtc, delta, sv + bump)).score >= base);
        }
    }
}

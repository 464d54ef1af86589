//! Momentum pillar: day change, VWAP position, relative volume.

use super::tier_at_least;
use crate::domain::evidence::Evidence;
use crate::domain::scoring::pillar::{Factor, MissingInputs, PillarName, PillarScore};

fn day_change_points(chg_pct: f64) -> u8 {
    if chg_pct > 0.0 {
        tier_at_least(chg_pct, &[(3.0, 10), (1.5, 7), (0.5, 4)]).max(2)
    } else {
        0
    }
}

fn vwap_points(distance_pct: f64) -> u8 {
    if distance_pct >= 1.0 {
        8
    } else if distance_pct > 0.0 {
        5
    } else {
        0
    }
}

fn relative_volume_points(ratio: f64) -> u8 {
    tier_at_least(ratio, &[(2.0, 7), (1.5, 5), (1.0, 2)])
}

/// Score the momentum pillar.
pub fn score(evidence: &Evidence, max: u8) -> PillarScore {
    let price = &evidence.price;
    let mut missing = MissingInputs::default();

    let last = missing.require("last", price.last.get());
    let prev = missing.require("previousClose", price.previous_close.get());
    let vwap = missing.require("vwap", price.vwap.get());
    let volume = missing.require("dayVolume", price.day_volume.get());
    let avg_volume = missing.require("avgVolume", price.avg_volume.get());

    let day_change = match (last, prev) {
        (Some(_), Some(_)) => price.day_change_pct().map_or_else(
            || Factor::missing("dayChange", 10),
            |chg| Factor::new("dayChange", day_change_points(chg), 10, format!("chg {chg:.2}%")),
        ),
        _ => Factor::missing("dayChange", 10),
    };

    let vwap_position = match (last, vwap) {
        (Some(last), Some(vwap)) if vwap > 0.0 => {
            let distance = (last - vwap) / vwap * 100.0;
            Factor::new("vwapPosition", vwap_points(distance), 8, format!("vs vwap {distance:.2}%"))
        }
        _ => Factor::missing("vwapPosition", 8),
    };

    let relative_volume = match (volume, avg_volume) {
        (Some(volume), Some(avg)) if avg > 0.0 => {
            let ratio = volume / avg;
            Factor::new(
                "relativeVolume",
                relative_volume_points(ratio),
                7,
                format!("rvol {ratio:.2}x"),
            )
        }
        _ => Factor::missing("relativeVolume", 7),
    };

    PillarScore::from_factors(
        PillarName::Momentum,
        max,
        vec![day_change, vwap_position, relative_volume],
        missing.into_inner(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(3.0 => 10)]
    #[test_case(1.5 => 7)]
    #[test_case(0.5 => 4)]
    #[test_case(0.1 => 2)]
    #[test_case(0.0 => 0)]
    #[test_case(-2.0 => 0)]
    fn day_change(chg: f64) -> u8 {
        day_change_points(chg)
    }

    #[test_case(1.0 => 8)]
    #[test_case(0.2 => 5)]
    #[test_case(-0.2 => 0)]
    fn vwap_position(distance: f64) -> u8 {
        vwap_points(distance)
    }

    #[test_case(2.5 => 7)]
    #[test_case(1.5 => 5)]
    #[test_case(1.0 => 2)]
    #[test_case(0.8 => 0)]
    fn relative_volume(ratio: f64) -> u8 {
        relative_volume_points(ratio)
    }
}

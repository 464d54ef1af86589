//! Structure pillar: gamma position, max-pain pull, call-wall headroom, put-wall support.

use rust_decimal::prelude::ToPrimitive;

use crate::domain::evidence::Evidence;
use crate::domain::options_analytics::OptionsAnalytics;
use crate::domain::scoring::pillar::{Factor, MissingInputs, PillarName, PillarScore};

fn gamma_position_points(spot: f64, flip: Option<f64>, net_gex: f64) -> u8 {
    match flip {
        Some(flip) if spot > flip => 8,
        Some(_) => 0,
        None if net_gex > 0.0 => 4,
        None => 0,
    }
}

fn max_pain_points(pull_pct: f64) -> u8 {
    if pull_pct >= 2.0 {
        7
    } else if pull_pct > 0.0 {
        4
    } else if pull_pct >= -2.0 {
        2
    } else {
        0
    }
}

fn call_wall_points(headroom_pct: Option<f64>) -> u8 {
    match headroom_pct {
        None => 6,
        Some(pct) if pct >= 5.0 => 6,
        Some(pct) if pct >= 2.0 => 3,
        Some(_) => 0,
    }
}

fn put_wall_points(cushion_pct: f64) -> u8 {
    if cushion_pct <= 3.0 {
        4
    } else if cushion_pct <= 6.0 {
        2
    } else {
        0
    }
}

fn pct_from_spot(level: f64, spot: f64) -> f64 {
    (level - spot) / spot * 100.0
}

fn factors(analytics: &OptionsAnalytics, spot: f64) -> Vec<Factor> {
    let gamma = analytics.gamma;
    let gamma_position = Factor::new(
        "gammaPosition",
        gamma_position_points(spot, gamma.flip_level, gamma.net_gex),
        8,
        gamma.flip_level.map_or_else(
            || format!("no flip, netGex {:.0}", gamma.net_gex),
            |flip| format!("flip {flip:.2}"),
        ),
    );

    let max_pain = analytics
        .max_pain
        .and_then(|mp| mp.strike.to_f64())
        .map_or_else(
            || Factor::missing("maxPainPull", 7),
            |strike| {
                let pull = pct_from_spot(strike, spot);
                Factor::new("maxPainPull", max_pain_points(pull), 7, format!("max pain {strike:.2} ({pull:.2}%)"))
            },
        );

    let call_headroom = analytics
        .walls
        .call_wall
        .and_then(|w| w.to_f64())
        .map(|wall| pct_from_spot(wall, spot));
    let call_wall = Factor::new(
        "callWallHeadroom",
        call_wall_points(call_headroom),
        6,
        call_headroom.map_or_else(|| "no wall above".to_string(), |pct| format!("headroom {pct:.2}%")),
    );

    let put_wall = analytics
        .walls
        .put_wall
        .and_then(|w| w.to_f64())
        .map_or_else(
            || Factor::new("putWallSupport", 0, 4, "no wall below"),
            |wall| {
                let cushion = -pct_from_spot(wall, spot);
                Factor::new("putWallSupport", put_wall_points(cushion), 4, format!("cushion {cushion:.2}%"))
            },
        );

    vec![gamma_position, max_pain, call_wall, put_wall]
}

/// Score the structure pillar.
///
/// Requires a ready, non-empty chain and a spot price; otherwise every factor
/// is 0.
pub fn score(evidence: &Evidence, max: u8) -> PillarScore {
    let mut missing = MissingInputs::default();
    let spot = missing.require("spot", evidence.spot_price());
    let chain = missing.require(
        "optionsChain",
        (evidence.options.is_ready() && !evidence.analytics.is_empty()).then_some(()),
    );

    let factors = match (spot, chain) {
        (Some(spot), Some(())) => factors(&evidence.analytics, spot),
        _ => vec![
            Factor::missing("gammaPosition", 8),
            Factor::missing("maxPainPull", 7),
            Factor::missing("callWallHeadroom", 6),
            Factor::missing("putWallSupport", 4),
        ],
    };

    PillarScore::from_factors(PillarName::Structure, max, factors, missing.into_inner())
}

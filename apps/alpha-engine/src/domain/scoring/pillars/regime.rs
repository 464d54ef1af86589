//! Regime pillar: index trend, volatility index, rate and dollar proxies.

use super::{tier_at_least, tier_below};
use crate::domain::evidence::Evidence;
use crate::domain::scoring::pillar::{Factor, MissingInputs, PillarName, PillarScore};

fn index_trend_points(change_pct: f64) -> u8 {
    tier_at_least(change_pct, &[(0.5, 5), (0.0, 3), (-0.5, 1)])
}

fn volatility_index_points(level: f64) -> u8 {
    tier_below(level, &[(15.0, 5), (20.0, 3), (25.0, 1)])
}

/// Score the regime pillar.
pub fn score(evidence: &Evidence, max: u8) -> PillarScore {
    let backdrop = &evidence.macro_backdrop;
    let mut missing = MissingInputs::default();

    let index_trend = missing
        .require("indexChangePct", backdrop.index_change_pct.get())
        .map_or_else(
            || Factor::missing("indexTrend", 5),
            |chg| Factor::new("indexTrend", index_trend_points(chg), 5, format!("index {chg:.2}%")),
        );
    let volatility = missing
        .require("volatilityIndex", backdrop.volatility_index.get())
        .map_or_else(
            || Factor::missing("volatilityIndex", 5),
            |level| Factor::new("volatilityIndex", volatility_index_points(level), 5, format!("vol index {level:.1}")),
        );
    let rate = missing
        .require("rateProxyChange", backdrop.rate_proxy_change.get())
        .map_or_else(
            || Factor::missing("rateProxy", 3),
            |chg| Factor::new("rateProxy", if chg <= 0.0 { 3 } else { 0 }, 3, format!("rates {chg:+.2}")),
        );
    let dollar = missing
        .require("dollarIndexChange", backdrop.dollar_index_change.get())
        .map_or_else(
            || Factor::missing("dollarProxy", 2),
            |chg| Factor::new("dollarProxy", if chg <= 0.0 { 2 } else { 0 }, 2, format!("dollar {chg:+.2}")),
        );

    PillarScore::from_factors(
        PillarName::Regime,
        max,
        vec![index_trend, volatility, rate, dollar],
        missing.into_inner(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.8 => 5)]
    #[test_case(0.0 => 3)]
    #[test_case(-0.5 => 1)]
    #[test_case(-1.0 => 0)]
    fn index_trend(chg: f64) -> u8 {
        index_trend_points(chg)
    }

    #[test_case(12.0 => 5)]
    #[test_case(15.0 => 3)]
    #[test_case(24.9 => 1)]
    #[test_case(30.0 => 0)]
    fn volatility_index(level: f64) -> u8 {
        volatility_index_points(level)
    }
}

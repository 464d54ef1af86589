//! Open-interest walls and ATM implied volatility.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::options_analytics::value_objects::{OptionContract, OptionWalls};

fn strongest_strike<'a>(
    contracts: impl Iterator<Item = &'a OptionContract>,
    spot: f64,
) -> Option<Decimal> {
    let mut oi_by_strike: BTreeMap<Decimal, u64> = BTreeMap::new();
    for contract in contracts {
        *oi_by_strike.entry(contract.strike()).or_insert(0) += contract.open_interest();
    }

    let mut best: Option<(Decimal, u64, f64)> = None;
    for (strike, oi) in oi_by_strike {
        if oi == 0 {
            continue;
        }
        let distance = (strike.to_f64().unwrap_or(f64::MAX) - spot).abs();
        let better = match best {
            None => true,
            Some((_, best_oi, best_distance)) => {
                oi > best_oi || (oi == best_oi && distance < best_distance)
            }
        };
        if better {
            best = Some((strike, oi, distance));
        }
    }

    best.map(|(strike, _, _)| strike)
}

/// Largest call OI at or above spot and largest put OI at or below spot.
///
/// Ties go to the strike closest to spot.
#[must_use]
pub fn option_walls(contracts: &[OptionContract], spot: f64) -> OptionWalls {
    OptionWalls {
        call_wall: strongest_strike(
            contracts.iter().filter(|c| c.is_call() && c.strike_f64() >= spot),
            spot,
        ),
        put_wall: strongest_strike(
            contracts.iter().filter(|c| c.is_put() && c.strike_f64() <= spot),
            spot,
        ),
    }
}

/// Mean implied volatility, in percent, of contracts within `band` of spot.
#[must_use]
pub fn atm_implied_volatility(contracts: &[OptionContract], spot: f64, band: f64) -> Option<f64> {
    let (sum, count) = contracts
        .iter()
        .filter(|c| c.is_near(spot, band))
        .filter_map(OptionContract::implied_volatility)
        .fold((0.0, 0usize), |(sum, count), iv| (sum + iv, count + 1));

    (count > 0).then(|| sum / count as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn walls_pick_largest_oi_on_each_side() {
        let chain = vec![
            OptionContract::call(dec!(105), expiry(), 800),
            OptionContract::call(dec!(110), expiry(), 1_500),
            OptionContract::call(dec!(95), expiry(), 9_000),
            OptionContract::put(dec!(95), expiry(), 1_200),
            OptionContract::put(dec!(90), expiry(), 700),
            OptionContract::put(dec!(105), expiry(), 9_000),
        ];
        let walls = option_walls(&chain, 100.0);
        assert_eq!(walls.call_wall, Some(dec!(110)));
        assert_eq!(walls.put_wall, Some(dec!(95)));
    }

    #[test]
    fn wall_ties_go_to_closest_strike() {
        let chain = vec![
            OptionContract::call(dec!(110), expiry(), 500),
            OptionContract::call(dec!(102), expiry(), 500),
        ];
        assert_eq!(option_walls(&chain, 100.0).call_wall, Some(dec!(102)));
    }

    #[test]
    fn no_contracts_above_spot_has_no_call_wall() {
        let chain = vec![OptionContract::call(dec!(90), expiry(), 500)];
        let walls = option_walls(&chain, 100.0);
        assert!(walls.call_wall.is_none());
        assert!(walls.put_wall.is_none());
    }

    #[test]
    fn atm_iv_is_percent_mean() {
        let chain = vec![
            OptionContract::call(dec!(100), expiry(), 10).with_implied_volatility(Some(0.30)),
            OptionContract::put(dec!(101), expiry(), 10).with_implied_volatility(Some(0.40)),
            OptionContract::call(dec!(120), expiry(), 10).with_implied_volatility(Some(0.90)),
        ];
        let iv = atm_implied_volatility(&chain, 100.0, 0.02).unwrap();
        assert!((iv - 35.0).abs() < 1e-9);
        assert!(atm_implied_volatility(&[], 100.0, 0.02).is_none());
    }
}

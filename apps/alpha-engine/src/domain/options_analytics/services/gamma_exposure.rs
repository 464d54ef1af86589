//! Gamma exposure and flip level.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::options_analytics::value_objects::{GammaExposure, OptionContract};

/// Aggregate dealer gamma exposure over a chain.
///
/// Contracts without a finite gamma are excluded from both sums.
#[must_use]
pub fn gamma_exposure(contracts: &[OptionContract]) -> GammaExposure {
    let (net_gex, total_gamma) = contracts
        .iter()
        .filter_map(OptionContract::gex_contribution)
        .fold((0.0, 0.0), |(net, total), c| (net + c, total + c.abs()));

    GammaExposure {
        net_gex,
        total_gamma,
        flip_level: gamma_flip(contracts),
    }
}

/// Estimate the underlying price where cumulative signed GEX crosses zero.
///
/// Contributions are summed per strike, accumulated in ascending strike order,
/// and the first sign change between adjacent strikes is linearly interpolated.
#[must_use]
pub fn gamma_flip(contracts: &[OptionContract]) -> Option<f64> {
    let mut by_strike: BTreeMap<Decimal, f64> = BTreeMap::new();
    for contract in contracts {
        if let Some(c) = contract.gex_contribution() {
            *by_strike.entry(contract.strike()).or_insert(0.0) += c;
        }
    }

    let mut cumulative = 0.0;
    let mut previous: Option<(f64, f64)> = None;

    for (strike, contribution) in by_strike {
        let strike = strike.to_f64()?;
        cumulative += contribution;

        if let Some((prev_strike, prev_cum)) = previous {
            if prev_cum * cumulative < 0.0 {
                let weight = -prev_cum / (cumulative - prev_cum);
                return Some(prev_strike + (strike - prev_strike) * weight);
            }
            if cumulative == 0.0 && prev_cum != 0.0 {
                return Some(strike);
            }
        }

        if cumulative != 0.0 || previous.is_some() {
            previous = Some((strike, cumulative));
        }
    }

    None
}

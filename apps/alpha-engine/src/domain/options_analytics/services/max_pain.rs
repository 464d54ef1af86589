//! Max pain over one expiry.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::domain::options_analytics::errors::AnalyticsError;
use crate::domain::options_analytics::value_objects::{MaxPain, OptionContract};

/// Aggregate writer payout if the underlying settles at `price`.
///
/// Calls below `price` pay `(price − K) × OI`; puts above pay `(K − price) × OI`.
#[must_use]
pub fn pain_at(contracts: &[OptionContract], price: Decimal) -> Decimal {
    contracts
        .iter()
        .map(|contract| {
            let strike = contract.strike();
            let oi = Decimal::from(contract.open_interest());
            if contract.is_call() && strike < price {
                (price - strike) * oi
            } else if contract.is_put() && strike > price {
                (strike - price) * oi
            } else {
                Decimal::ZERO
            }
        })
        .sum()
}

/// Strike minimizing [`pain_at`] among the distinct strikes of `contracts`.
///
/// Ties resolve to the lowest strike, so the result does not depend on
/// contract order.
pub fn max_pain(contracts: &[OptionContract]) -> Result<MaxPain, AnalyticsError> {
    let strikes: BTreeSet<Decimal> = contracts.iter().map(OptionContract::strike).collect();

    let mut best: Option<MaxPain> = None;
    for strike in strikes {
        let pain = pain_at(contracts, strike);
        if best.is_none_or(|current| pain < current.pain) {
            best = Some(MaxPain { strike, pain });
        }
    }

    best.ok_or(AnalyticsError::EmptyChain)
}

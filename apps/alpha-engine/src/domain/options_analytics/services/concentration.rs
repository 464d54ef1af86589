//! Expiry bucketing and ATM gamma concentration.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::options_analytics::calendar::TradingCalendar;
use crate::domain::options_analytics::value_objects::{
    ConcentrationLabel, ExpiryBucket, GammaConcentration, OptionContract,
};

/// Group contracts by expiration date, nearest first.
///
/// Buckets that expired before the effective trading day are dropped.
#[must_use]
pub fn bucket_by_expiry(
    contracts: &[OptionContract],
    spot: f64,
    today: NaiveDate,
    calendar: &TradingCalendar,
    atm_band: f64,
) -> Vec<ExpiryBucket> {
    let mut grouped: BTreeMap<NaiveDate, Vec<OptionContract>> = BTreeMap::new();
    for contract in contracts {
        grouped
            .entry(contract.expiration_date())
            .or_default()
            .push(contract.clone());
    }

    grouped
        .into_iter()
        .filter_map(|(expiry, group)| {
            let dte = calendar.days_to_expiry(today, expiry)?;
            Some(ExpiryBucket::new(expiry, dte, group, spot, atm_band))
        })
        .collect()
}

/// Concentration of the reference (nearest) bucket.
#[must_use]
pub fn concentration(buckets: &[ExpiryBucket]) -> GammaConcentration {
    buckets
        .first()
        .map_or_else(GammaConcentration::default, |nearest| {
            let pct = nearest.atm_concentration_pct();
            GammaConcentration {
                expiration_date: Some(nearest.expiration_date()),
                dte: Some(nearest.dte()),
                atm_concentration_pct: pct,
                label: ConcentrationLabel::from_pct(pct),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn buckets_sorted_nearest_first_and_expired_dropped() {
        // 2025-01-15 is a Wednesday
        let today = date(2025, 1, 15);
        let chain = vec![
            OptionContract::call(dec!(100), date(2025, 2, 21), 10),
            OptionContract::call(dec!(100), date(2025, 1, 17), 10),
            OptionContract::put(dec!(100), date(2025, 1, 10), 10),
        ];
        let buckets = bucket_by_expiry(&chain, 100.0, today, &TradingCalendar::default(), 0.02);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].expiration_date(), date(2025, 1, 17));
        assert_eq!(buckets[0].dte(), 2);
        assert_eq!(buckets[1].expiration_date(), date(2025, 2, 21));
    }

    #[test]
    fn nearest_bucket_drives_concentration() {
        let today = date(2025, 1, 15);
        let chain = vec![
            OptionContract::call(dec!(100), date(2025, 1, 17), 100).with_greeks(None, Some(0.05)),
            OptionContract::call(dec!(120), date(2025, 1, 17), 10).with_greeks(None, Some(0.05)),
            OptionContract::call(dec!(150), date(2025, 2, 21), 10_000).with_greeks(None, Some(0.05)),
        ];
        let buckets = bucket_by_expiry(&chain, 100.0, today, &TradingCalendar::default(), 0.02);
        let result = concentration(&buckets);

        assert_eq!(result.expiration_date, Some(date(2025, 1, 17)));
        assert!((result.atm_concentration_pct - 100.0 / 110.0 * 100.0).abs() < 1e-9);
        assert_eq!(result.label, ConcentrationLabel::Sticky);
    }

    #[test]
    fn no_buckets_is_low() {
        let result = concentration(&[]);
        assert_eq!(result.label, ConcentrationLabel::Low);
        assert!(result.expiration_date.is_none());
    }
}

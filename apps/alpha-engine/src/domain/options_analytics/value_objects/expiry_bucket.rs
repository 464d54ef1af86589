//! Expiry Bucket Value Object

use chrono::NaiveDate;
use serde::Serialize;

use super::OptionContract;

/// Contracts sharing one expiration date, with aggregate gamma and OI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryBucket {
    expiration_date: NaiveDate,
    dte: i64,
    #[serde(skip)]
    contracts: Vec<OptionContract>,
    net_gex: f64,
    total_gamma: f64,
    atm_gamma: f64,
    call_open_interest: u64,
    put_open_interest: u64,
}

impl ExpiryBucket {
    /// Build a bucket from contracts that all expire on `expiration_date`.
    ///
    /// `atm_band` is the fractional distance from `spot` counted as ATM.
    #[must_use]
    pub fn new(
        expiration_date: NaiveDate,
        dte: i64,
        contracts: Vec<OptionContract>,
        spot: f64,
        atm_band: f64,
    ) -> Self {
        let mut net_gex = 0.0;
        let mut total_gamma = 0.0;
        let mut atm_gamma = 0.0;
        let mut call_open_interest = 0;
        let mut put_open_interest = 0;

        for contract in &contracts {
            if let Some(signed) = contract.gex_contribution() {
                net_gex += signed;
                total_gamma += signed.abs();
                if contract.is_near(spot, atm_band) {
                    atm_gamma += signed.abs();
                }
            }
            if contract.is_call() {
                call_open_interest += contract.open_interest();
            } else {
                put_open_interest += contract.open_interest();
            }
        }

        Self {
            expiration_date,
            dte,
            contracts,
            net_gex,
            total_gamma,
            atm_gamma,
            call_open_interest,
            put_open_interest,
        }
    }

    /// Get the expiration date.
    #[must_use]
    pub const fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// Days to expiry from the effective trading session.
    #[must_use]
    pub const fn dte(&self) -> i64 {
        self.dte
    }

    /// Contracts in this bucket.
    #[must_use]
    pub fn contracts(&self) -> &[OptionContract] {
        &self.contracts
    }

    /// Signed gamma exposure of the bucket.
    #[must_use]
    pub const fn net_gex(&self) -> f64 {
        self.net_gex
    }

    /// Unsigned gamma exposure of the bucket.
    #[must_use]
    pub const fn total_gamma(&self) -> f64 {
        self.total_gamma
    }

    /// Total call open interest.
    #[must_use]
    pub const fn call_open_interest(&self) -> u64 {
        self.call_open_interest
    }

    /// Total put open interest.
    #[must_use]
    pub const fn put_open_interest(&self) -> u64 {
        self.put_open_interest
    }

    /// Share of total gamma (percent) within the ATM band.
    #[must_use]
    pub fn atm_concentration_pct(&self) -> f64 {
        if self.total_gamma <= 0.0 {
            return 0.0;
        }
        (self.atm_gamma / self.total_gamma * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn aggregates_gamma_and_oi() {
        let contracts = vec![
            OptionContract::call(dec!(100), expiry(), 100).with_greeks(None, Some(0.05)),
            OptionContract::put(dec!(90), expiry(), 50).with_greeks(None, Some(0.02)),
        ];
        let bucket = ExpiryBucket::new(expiry(), 3, contracts, 100.0, 0.02);

        // call: 0.05 * 100 * 100 = 500; put: -(0.02 * 50 * 100) = -100
        assert!((bucket.net_gex() - 400.0).abs() < 1e-9);
        assert!((bucket.total_gamma() - 600.0).abs() < 1e-9);
        assert_eq!(bucket.call_open_interest(), 100);
        assert_eq!(bucket.put_open_interest(), 50);
        assert!((bucket.atm_concentration_pct() - 500.0 / 600.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_gamma_bucket_has_zero_concentration() {
        let contracts = vec![OptionContract::call(dec!(100), expiry(), 100)];
        let bucket = ExpiryBucket::new(expiry(), 0, contracts, 100.0, 0.02);
        assert_eq!(bucket.atm_concentration_pct(), 0.0);
    }
}

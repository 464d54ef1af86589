//! Chain Analyzer Domain Service

use chrono::NaiveDate;

use super::{
    atm_implied_volatility, bucket_by_expiry, concentration, gamma_exposure, max_pain,
    option_walls, options_pressure,
};
use crate::domain::options_analytics::calendar::TradingCalendar;
use crate::domain::options_analytics::errors::AnalyticsError;
use crate::domain::options_analytics::value_objects::{OptionContract, OptionsAnalytics};

/// Default ATM band: ±2% of spot.
pub const ATM_BAND: f64 = 0.02;

/// Computes every chain-derived metric for one underlying.
///
/// Expired contracts are dropped first; whole-chain metrics (GEX, OPI, volume)
/// use every remaining contract, while max pain, walls, concentration and ATM
/// IV use the nearest expiry bucket.
#[derive(Debug, Clone)]
pub struct ChainAnalyzer {
    calendar: TradingCalendar,
    atm_band: f64,
}

impl Default for ChainAnalyzer {
    fn default() -> Self {
        Self::new(TradingCalendar::default(), ATM_BAND)
    }
}

impl ChainAnalyzer {
    /// Create an analyzer with a calendar and ATM band (fraction of spot).
    #[must_use]
    pub const fn new(calendar: TradingCalendar, atm_band: f64) -> Self {
        Self { calendar, atm_band }
    }

    /// Get the trading calendar.
    #[must_use]
    pub const fn calendar(&self) -> &TradingCalendar {
        &self.calendar
    }

    /// Analyze a chain snapshot.
    ///
    /// An empty (or fully expired) chain yields [`OptionsAnalytics::empty`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidUnderlyingPrice`] when `spot` is not a
    /// positive finite number.
    pub fn analyze(
        &self,
        contracts: &[OptionContract],
        spot: f64,
        today: NaiveDate,
    ) -> Result<OptionsAnalytics, AnalyticsError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(AnalyticsError::InvalidUnderlyingPrice { price: spot });
        }

        let buckets = bucket_by_expiry(contracts, spot, today, &self.calendar, self.atm_band);
        if buckets.is_empty() {
            return Ok(OptionsAnalytics::empty());
        }

        let live: Vec<OptionContract> = buckets
            .iter()
            .flat_map(|bucket| bucket.contracts().iter().cloned())
            .collect();
        let nearest = buckets[0].contracts();

        let (call_volume, put_volume) = live.iter().fold((0, 0), |(calls, puts), c| {
            if c.is_call() {
                (calls + c.day_volume(), puts)
            } else {
                (calls, puts + c.day_volume())
            }
        });

        Ok(OptionsAnalytics {
            contracts_used: live.len(),
            gamma: gamma_exposure(&live),
            concentration: concentration(&buckets),
            max_pain: max_pain(nearest).ok(),
            pressure: options_pressure(&live),
            walls: option_walls(nearest, spot),
            atm_iv_pct: atm_implied_volatility(nearest, spot, self.atm_band),
            call_volume,
            put_volume,
            total_open_interest: live.iter().map(OptionContract::open_interest).sum(),
        })
    }
}

//! Trading calendar used for days-to-expiry.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Weekend- and holiday-aware exchange calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradingCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl TradingCalendar {
    /// Create a calendar with the given exchange holidays.
    #[must_use]
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Check whether the exchange is open on `date`.
    #[must_use]
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// The trading session a calendar date belongs to.
    ///
    /// Weekends and holidays roll forward to the next open session.
    #[must_use]
    pub fn effective_today(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        // Bounded walk; falls back to the input date.
        for _ in 0..366 {
            if self.is_trading_day(current) {
                return current;
            }
            current += Duration::days(1);
        }
        date
    }

    /// Calendar days from the effective session to `expiry`.
    ///
    /// Returns `None` when the contract has already expired.
    #[must_use]
    pub fn days_to_expiry(&self, today: NaiveDate, expiry: NaiveDate) -> Option<i64> {
        let dte = (expiry - self.effective_today(today)).num_days();
        (dte >= 0).then_some(dte)
    }
}

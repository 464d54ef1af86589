//! Exchange calendar configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::options_analytics::TradingCalendar;

/// Exchange holidays (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Full-day closures.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl CalendarConfig {
    /// Build the trading calendar.
    #[must_use]
    pub fn to_calendar(&self) -> TradingCalendar {
        TradingCalendar::new(self.holidays.iter().copied())
    }
}

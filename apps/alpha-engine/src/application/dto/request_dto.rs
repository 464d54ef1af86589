//! Scoring request DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::decision::ContinuityRecord;

/// Request to score one ticker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTickerRequestDto {
    /// Ticker symbol, normalized to upper case.
    pub ticker: String,
    /// Underlying price supplied by the caller instead of the quote.
    #[serde(default)]
    pub spot: Option<f64>,
    /// Session date; defaults to the current UTC date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// This ticker's record from the previous run.
    #[serde(default)]
    pub previous: Option<ContinuityRecord>,
}

/// Request to score and rank a set of tickers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBatchRequestDto {
    /// Ticker symbols.
    pub tickers: Vec<String>,
    /// Session date; defaults to the current UTC date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Continuity snapshot from the previous run.
    #[serde(default)]
    pub previous: Vec<ContinuityRecord>,
}

impl ScoreBatchRequestDto {
    /// Create a request with no previous run.
    #[must_use]
    pub fn new<S: Into<String>>(tickers: impl IntoIterator<Item = S>) -> Self {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Attach the previous run's continuity snapshot.
    #[must_use]
    pub fn with_previous(mut self, previous: Vec<ContinuityRecord>) -> Self {
        self.previous = previous;
        self
    }

    /// Pin the session date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }
}

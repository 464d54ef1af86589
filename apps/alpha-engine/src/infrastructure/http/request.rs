//! HTTP request DTOs.
//!
//! Requests carry the raw upstream snapshots inline; each one is served to
//! the use case through an [`InMemoryMarketData`] built for that request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::dto::{ScoreBatchRequestDto, ScoreTickerRequestDto};
use crate::domain::decision::ContinuityRecord;
use crate::infrastructure::market_data::{InMemoryMarketData, TickerSnapshots};

/// Request to score one ticker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    /// Ticker symbol.
    pub ticker: String,
    /// Raw snapshots for the ticker.
    #[serde(flatten)]
    pub snapshots: TickerSnapshots,
    /// Market-wide macro snapshot.
    #[serde(default, rename = "macro")]
    pub macro_snapshot: Option<Value>,
    /// Underlying price override.
    #[serde(default)]
    pub spot: Option<f64>,
    /// Session date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The ticker's record from the previous run.
    #[serde(default)]
    pub previous: Option<ContinuityRecord>,
}

impl ScoreRequest {
    /// Split into the snapshot adapter and the use case request.
    #[must_use]
    pub fn into_parts(self) -> (InMemoryMarketData, ScoreTickerRequestDto) {
        let mut market = InMemoryMarketData::new().with_ticker(&self.ticker, self.snapshots);
        if let Some(snapshot) = self.macro_snapshot {
            market = market.with_macro(snapshot);
        }

        let dto = ScoreTickerRequestDto {
            ticker: self.ticker,
            spot: self.spot,
            as_of: self.as_of,
            previous: self.previous,
        };
        (market, dto)
    }
}

/// One ticker's inline snapshots in a batch request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTickerInput {
    /// Ticker symbol.
    pub ticker: String,
    /// Raw snapshots for the ticker.
    #[serde(flatten)]
    pub snapshots: TickerSnapshots,
}

/// Request to score a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBatchRequest {
    /// Tickers with their snapshots.
    pub tickers: Vec<BatchTickerInput>,
    /// Macro snapshot shared by the batch.
    #[serde(default, rename = "macro")]
    pub macro_snapshot: Option<Value>,
    /// Continuity snapshot from the previous run.
    #[serde(default)]
    pub previous: Vec<ContinuityRecord>,
    /// Session date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl ScoreBatchRequest {
    /// Split into the snapshot adapter and the use case request.
    #[must_use]
    pub fn into_parts(self) -> (InMemoryMarketData, ScoreBatchRequestDto) {
        let mut market = InMemoryMarketData::new();
        if let Some(snapshot) = self.macro_snapshot {
            market = market.with_macro(snapshot);
        }

        let mut tickers = Vec::with_capacity(self.tickers.len());
        for input in self.tickers {
            market.set_ticker(&input.ticker, input.snapshots);
            tickers.push(input.ticker);
        }

        let dto = ScoreBatchRequestDto {
            tickers,
            as_of: self.as_of,
            previous: self.previous,
        };
        (market, dto)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn score_request_reads_inline_snapshots() {
        let request: ScoreRequest = serde_json::from_value(json!({
            "ticker": "nvda",
            "quote": {"last": 100.0},
            "macro": {"vix": 14.0},
            "asOf": "2025-01-15"
        }))
        .unwrap();

        assert!(request.snapshots.quote.is_some());
        assert!(request.snapshots.chain.is_none());
        assert!(request.macro_snapshot.is_some());

        let (_, dto) = request.into_parts();
        assert_eq!(dto.ticker, "nvda");
        assert_eq!(dto.as_of, NaiveDate::from_ymd_opt(2025, 1, 15));
    }

    #[test]
    fn batch_request_defaults_previous_to_empty() {
        let request: ScoreBatchRequest = serde_json::from_value(json!({
            "tickers": [{"ticker": "AAPL"}, {"ticker": "MSFT", "quote": {"last": 400.0}}]
        }))
        .unwrap();

        assert!(request.previous.is_empty());
        let (_, dto) = request.into_parts();
        assert_eq!(dto.tickers, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }
}

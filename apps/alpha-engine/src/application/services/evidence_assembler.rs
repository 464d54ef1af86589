//! Evidence Assembler
//!
//! Fetches the raw snapshots for one ticker through the [`MarketDataPort`],
//! wrapping every fetch in the shared retry policy, and normalizes them into
//! [`Evidence`]. A fetch that still fails after retries leaves its fields
//! absent (`UNAVAILABLE`); nothing here fails for missing data.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::application::ports::{MarketDataError, MarketDataPort, SnapshotKind};
use crate::domain::evidence::{AbsenceReason, Evidence, Observed, RawSnapshots, build_evidence};
use crate::domain::options_analytics::{AnalyticsError, ChainAnalyzer};
use crate::domain::shared::Ticker;
use crate::observability::record_upstream_failure;
use crate::resilience::{RetryError, RetryPolicy, retry_with_backoff};

/// Assembles typed evidence from an upstream market-data port.
pub struct EvidenceAssembler<M>
where
    M: MarketDataPort,
{
    market_data: Arc<M>,
    retry: RetryPolicy,
    analyzer: ChainAnalyzer,
}

impl<M> EvidenceAssembler<M>
where
    M: MarketDataPort,
{
    /// Create a new assembler.
    pub const fn new(market_data: Arc<M>, retry: RetryPolicy, analyzer: ChainAnalyzer) -> Self {
        Self {
            market_data,
            retry,
            analyzer,
        }
    }

    /// Get the chain analyzer.
    pub const fn analyzer(&self) -> &ChainAnalyzer {
        &self.analyzer
    }

    /// Get the retry policy.
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Fingerprint of the snapshots the port would serve for `ticker`.
    pub fn snapshot_fingerprint(&self, ticker: &Ticker) -> u64 {
        self.market_data.snapshot_fingerprint(ticker)
    }

    /// Fetch the market-wide macro snapshot.
    pub async fn fetch_macro(&self) -> Observed<Value> {
        let result = retry_with_backoff(&self.retry, |_| self.market_data.fetch_macro()).await;
        Self::observe(SnapshotKind::Macro, None, result)
    }

    /// Fetch the per-ticker snapshots concurrently.
    pub async fn fetch_snapshots(&self, ticker: &Ticker, macro_snapshot: Observed<Value>) -> RawSnapshots {
        let (chain, quote, short) = tokio::join!(
            retry_with_backoff(&self.retry, |_| self.market_data.fetch_options_chain(ticker)),
            retry_with_backoff(&self.retry, |_| self.market_data.fetch_quote(ticker)),
            retry_with_backoff(&self.retry, |_| self.market_data.fetch_short_snapshot(ticker)),
        );

        RawSnapshots {
            chain: Self::observe(SnapshotKind::Chain, Some(ticker), chain),
            quote: Self::observe(SnapshotKind::Quote, Some(ticker), quote),
            macro_snapshot,
            short: Self::observe(SnapshotKind::Short, Some(ticker), short),
        }
    }

    /// Fetch and normalize one ticker's evidence.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidUnderlyingPrice`] when `spot_override`
    /// is not a positive finite number.
    pub async fn assemble(
        &self,
        ticker: Ticker,
        macro_snapshot: Observed<Value>,
        spot_override: Option<f64>,
        today: NaiveDate,
    ) -> Result<Evidence, AnalyticsError> {
        let snapshots = self.fetch_snapshots(&ticker, macro_snapshot).await;
        self.normalize(ticker, &snapshots, spot_override, today)
    }

    /// Normalize already-fetched snapshots.
    ///
    /// # Errors
    ///
    /// Same as [`Self::assemble`].
    pub fn normalize(
        &self,
        ticker: Ticker,
        snapshots: &RawSnapshots,
        spot_override: Option<f64>,
        today: NaiveDate,
    ) -> Result<Evidence, AnalyticsError> {
        let (evidence, skipped) =
            build_evidence(ticker, snapshots, spot_override, &self.analyzer, today)?;

        if !skipped.is_empty() {
            tracing::warn!(
                ticker = %evidence.ticker,
                skipped = skipped.len(),
                first = %skipped[0],
                "Skipped malformed option contracts"
            );
        }

        Ok(evidence)
    }

    fn observe(
        kind: SnapshotKind,
        ticker: Option<&Ticker>,
        result: Result<Value, RetryError<MarketDataError>>,
    ) -> Observed<Value> {
        let ticker = ticker.map_or("*", Ticker::as_str);
        match result {
            Ok(value) => Observed::Present(value),
            Err(RetryError::Failed {
                source: MarketDataError::NotReported { .. },
                ..
            }) => Observed::Absent(AbsenceReason::NotReported),
            Err(err) => {
                let reason = match err {
                    RetryError::TimedOut { .. } => "timeout",
                    RetryError::Failed { .. } => "error",
                };
                tracing::warn!(
                    ticker,
                    field = kind.as_str(),
                    attempts = err.attempts(),
                    error = %err,
                    "Upstream fetch failed, field unavailable"
                );
                record_upstream_failure(kind.as_str(), reason);
                Observed::Absent(AbsenceReason::Unavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::domain::evidence::OptionsState;
    use crate::infrastructure::market_data::{InMemoryMarketData, TickerSnapshots};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
            jitter_factor: 0.0,
            attempt_timeout: Duration::from_millis(100),
            ..RetryPolicy::default()
        }
    }

    fn assembler(market: InMemoryMarketData) -> EvidenceAssembler<InMemoryMarketData> {
        EvidenceAssembler::new(Arc::new(market), fast_retry(), ChainAnalyzer::default())
    }

    fn snapshots() -> TickerSnapshots {
        TickerSnapshots {
            chain: Some(json!([
                {"strike": 100, "contractType": "call", "expirationDate": "2025-01-17", "openInterest": 500, "gamma": 0.05, "delta": 0.5},
                {"strike": 95, "contractType": "put", "expirationDate": "2025-01-17", "openInterest": 200, "gamma": 0.04, "delta": -0.4},
                {"strike": "bad", "contractType": "put", "expirationDate": "2025-01-17"}
            ])),
            quote: Some(json!({"last": 100.0, "previousClose": 98.0, "dayVolume": 1000, "vwap": 99.5})),
            short: None,
        }
    }

    #[tokio::test]
    async fn assembles_present_fields_and_counts_malformed() {
        let market = InMemoryMarketData::new().with_ticker("NVDA", snapshots());
        let assembler = assembler(market);
        let macro_snapshot = assembler.fetch_macro().await;

        let evidence = assembler
            .assemble(Ticker::new("NVDA"), macro_snapshot, None, today())
            .await
            .unwrap();

        assert_eq!(evidence.spot_price(), Some(100.0));
        assert!(evidence.options.is_ready());
        assert_eq!(evidence.malformed_contracts, 1);
        // No short snapshot supplied: not reported, not unavailable
        assert_eq!(
            evidence.short.short_interest_pct.absence(),
            Some(AbsenceReason::NotReported)
        );
        assert_eq!(
            evidence.macro_backdrop.volatility_index.absence(),
            Some(AbsenceReason::NotReported)
        );
    }

    #[tokio::test]
    async fn failed_fetch_marks_fields_unavailable() {
        let market = InMemoryMarketData::new()
            .with_ticker("NVDA", snapshots())
            .with_failure("NVDA", SnapshotKind::Chain)
            .with_failure("NVDA", SnapshotKind::Quote);
        let market = Arc::new(market);
        let assembler =
            EvidenceAssembler::new(Arc::clone(&market), fast_retry(), ChainAnalyzer::default());

        let evidence = assembler
            .assemble(Ticker::new("NVDA"), Observed::default(), None, today())
            .await
            .unwrap();

        assert_eq!(evidence.options, OptionsState::Pending);
        assert_eq!(
            evidence.price.last.absence(),
            Some(AbsenceReason::Unavailable)
        );
        // Three attempts each for chain and quote
        assert_eq!(market.fetch_count(SnapshotKind::Chain), 3);
        assert_eq!(market.fetch_count(SnapshotKind::Quote), 3);
    }

    #[tokio::test]
    async fn unknown_ticker_has_no_options() {
        let assembler = assembler(InMemoryMarketData::new());
        let evidence = assembler
            .assemble(Ticker::new("ZZZZ"), Observed::default(), None, today())
            .await
            .unwrap();

        assert_eq!(evidence.options, OptionsState::NoOptions);
        assert!(evidence.spot_price().is_none());
    }

    #[tokio::test]
    async fn rejects_invalid_spot_override() {
        let assembler = assembler(InMemoryMarketData::new().with_ticker("NVDA", snapshots()));
        let result = assembler
            .assemble(Ticker::new("NVDA"), Observed::default(), Some(0.0), today())
            .await;
        assert!(matches!(
            result,
            Err(AnalyticsError::InvalidUnderlyingPrice { .. })
        ));
    }
}

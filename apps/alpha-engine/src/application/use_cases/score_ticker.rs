//! Score Ticker Use Case

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::Instrument;

use crate::application::dto::{ScoreTickerRequestDto, TickerReportDto};
use crate::application::ports::MarketDataPort;
use crate::application::services::{EvidenceAssembler, ResultCache, ScoredTicker, TickerScorer};
use crate::domain::decision::{ContinuityBooster, ContinuityOutcome};
use crate::domain::shared::Ticker;
use crate::error::EngineError;
use crate::observability::{record_gate_fired, record_ticker_scored};

/// Use case for scoring a single ticker.
///
/// The decision runs the continuity booster with this ticker as the only
/// candidate, so a previous record from the caller is honoured.
pub struct ScoreTickerUseCase<M>
where
    M: MarketDataPort,
{
    assembler: EvidenceAssembler<M>,
    scorer: TickerScorer,
    booster: ContinuityBooster,
    cache: Option<Arc<ResultCache<ScoredTicker>>>,
}

impl<M> ScoreTickerUseCase<M>
where
    M: MarketDataPort,
{
    /// Create a new ScoreTickerUseCase.
    pub const fn new(
        assembler: EvidenceAssembler<M>,
        scorer: TickerScorer,
        booster: ContinuityBooster,
    ) -> Self {
        Self {
            assembler,
            scorer,
            booster,
            cache: None,
        }
    }

    /// Share scored tickers through `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ResultCache<ScoredTicker>>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid ticker or a caller-supplied spot
    /// price that is not positive and finite. Missing upstream data is not
    /// an error.
    pub async fn execute(
        &self,
        request: ScoreTickerRequestDto,
        now: DateTime<Utc>,
    ) -> Result<TickerReportDto, EngineError> {
        let ticker = Ticker::parse(&request.ticker)?;
        let span = tracing::info_span!("score_ticker", ticker = %ticker);
        self.run(ticker, request, now).instrument(span).await
    }

    async fn run(
        &self,
        ticker: Ticker,
        request: ScoreTickerRequestDto,
        now: DateTime<Utc>,
    ) -> Result<TickerReportDto, EngineError> {
        let started = Instant::now();
        let today = request.as_of.unwrap_or_else(|| now.date_naive());
        // Overrides change the result, so they never read or fill the cache
        let cache = self
            .cache
            .as_ref()
            .filter(|_| request.spot.is_none() && request.as_of.is_none());
        let key = cache.map(|c| {
            c.key(
                ticker.clone(),
                now,
                self.assembler.snapshot_fingerprint(&ticker),
            )
        });

        let hit = cache.zip(key.as_ref()).and_then(|(c, k)| c.get(k));
        let scored = match hit {
            Some(scored) => scored,
            None => {
                let macro_snapshot = self.assembler.fetch_macro().await;
                let evidence = self
                    .assembler
                    .assemble(ticker.clone(), macro_snapshot, request.spot, today)
                    .await?;
                let scored = self.scorer.score(&evidence);
                match cache.zip(key) {
                    Some((c, k)) => c.insert_if_absent(k, scored),
                    None => Arc::new(scored),
                }
            }
        };

        let previous: Vec<_> = request.previous.into_iter().collect();
        let outcome = self.booster.resolve(&[scored.candidate()], &previous);
        log_ignored(&outcome);

        let decision = outcome
            .decisions
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::internal("Continuity resolution produced no decision"))?;

        let report = TickerReportDto::from_scored(&scored, decision);
        record_report(&report, started.elapsed());
        tracing::debug!(
            score = report.score,
            grade = %report.grade,
            action = %report.action(),
            "Ticker scored"
        );
        Ok(report)
    }
}

/// Log continuity records the booster ignored.
pub(crate) fn log_ignored(outcome: &ContinuityOutcome) {
    for (ticker, reason) in &outcome.ignored {
        tracing::debug!(ticker = %ticker, reason = ?reason, "Ignored previous continuity record");
    }
}

/// Record scoring metrics for one report.
pub(crate) fn record_report(report: &TickerReportDto, elapsed: Duration) {
    record_ticker_scored(
        report.data_completeness.as_str(),
        report.action().as_str(),
        elapsed.as_secs_f64(),
    );
    for gate in &report.gates_applied {
        record_gate_fired(gate.as_str());
    }
}

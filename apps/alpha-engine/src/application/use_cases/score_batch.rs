//! Score Batch Use Case
//!
//! Scores a universe of tickers, resolves slot competition against the
//! previous run and ranks the result. Evidence is fetched with bounded
//! concurrency; scoring is pure and moves to rayon for larger batches.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use rayon::prelude::*;
use tracing::Instrument;

use super::score_ticker::{log_ignored, record_report};
use crate::application::dto::{BatchReportDto, ScoreBatchRequestDto, TickerReportDto};
use crate::application::ports::MarketDataPort;
use crate::application::services::{
    CacheKey, EvidenceAssembler, ResultCache, ScoredTicker, TickerScorer,
};
use crate::domain::decision::{Action, Candidate, ContinuityBooster};
use crate::domain::evidence::Evidence;
use crate::domain::shared::Ticker;
use crate::error::EngineError;

/// Batch execution options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Tickers whose evidence is fetched at once.
    pub max_concurrent_fetches: usize,
    /// Minimum fresh tickers before scoring runs in parallel.
    pub parallel_threshold: usize,
    /// Rows in the top-N table.
    pub top_n: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            parallel_threshold: 4,
            top_n: 5,
        }
    }
}

/// Use case for scoring and ranking a batch of tickers.
pub struct ScoreBatchUseCase<M>
where
    M: MarketDataPort,
{
    assembler: EvidenceAssembler<M>,
    scorer: TickerScorer,
    booster: ContinuityBooster,
    options: BatchOptions,
    cache: Option<Arc<ResultCache<ScoredTicker>>>,
}

impl<M> ScoreBatchUseCase<M>
where
    M: MarketDataPort,
{
    /// Create a new ScoreBatchUseCase.
    pub const fn new(
        assembler: EvidenceAssembler<M>,
        scorer: TickerScorer,
        booster: ContinuityBooster,
        options: BatchOptions,
    ) -> Self {
        Self {
            assembler,
            scorer,
            booster,
            options,
            cache: None,
        }
    }

    /// Share scored tickers through `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ResultCache<ScoredTicker>>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Get the batch options.
    pub const fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty ticker list or any invalid ticker.
    pub async fn execute(
        &self,
        request: ScoreBatchRequestDto,
        now: DateTime<Utc>,
    ) -> Result<BatchReportDto, EngineError> {
        // 1. Validate tickers
        let tickers = parse_tickers(&request.tickers)?;
        let started = Instant::now();
        let today = request.as_of.unwrap_or_else(|| now.date_naive());
        let cache = self.cache.as_ref().filter(|_| request.as_of.is_none());
        let keys: Vec<Option<CacheKey>> = tickers
            .iter()
            .map(|t| {
                cache.map(|c| c.key(t.clone(), now, self.assembler.snapshot_fingerprint(t)))
            })
            .collect();

        // 2. Serve what the cache already holds
        let mut scored: Vec<Option<Arc<ScoredTicker>>> = keys
            .iter()
            .map(|k| cache.zip(k.as_ref()).and_then(|(c, k)| c.get(k)))
            .collect();
        let hits = scored.iter().filter(|s| s.is_some()).count();
        let misses: Vec<(usize, Ticker)> = tickers
            .iter()
            .enumerate()
            .filter(|(i, _)| scored[*i].is_none())
            .map(|(i, t)| (i, t.clone()))
            .collect();

        // 3. Assemble evidence for the rest, macro fetched once
        let evidence = if misses.is_empty() {
            Vec::new()
        } else {
            self.assemble_all(misses, today).await
        };

        // 4. Score
        let scorer = &self.scorer;
        let fresh: Vec<(usize, ScoredTicker)> = if evidence.len() >= self.options.parallel_threshold
        {
            evidence
                .par_iter()
                .map(|(i, e)| (*i, scorer.score(e)))
                .collect()
        } else {
            evidence
                .iter()
                .map(|(i, e)| (*i, scorer.score(e)))
                .collect()
        };
        for (i, s) in fresh {
            scored[i] = Some(match cache.zip(keys[i].clone()) {
                Some((c, k)) => c.insert_if_absent(k, s),
                None => Arc::new(s),
            });
        }
        let scored: Vec<Arc<ScoredTicker>> = scored.into_iter().flatten().collect();

        // 5. Decide against the previous run
        let candidates: Vec<Candidate> = scored.iter().map(|s| s.candidate()).collect();
        let outcome = self.booster.resolve(&candidates, &request.previous);
        log_ignored(&outcome);

        let elapsed = started.elapsed();
        let per_ticker = elapsed / u32::try_from(scored.len().max(1)).unwrap_or(u32::MAX);
        let reports: Vec<TickerReportDto> = scored
            .iter()
            .zip(outcome.decisions)
            .map(|(s, d)| TickerReportDto::from_scored(s, d))
            .collect();
        for report in &reports {
            record_report(report, per_ticker);
        }

        let count = |action: Action| reports.iter().filter(|r| r.action() == action).count();
        tracing::info!(
            tickers = reports.len(),
            cached = hits,
            entered = count(Action::Enter),
            replaced = count(Action::Replace),
            exited = count(Action::Exit),
            elapsed_ms = elapsed.as_millis() as u64,
            "Batch scored"
        );

        let as_of = self.assembler.analyzer().calendar().effective_today(today);
        Ok(BatchReportDto::ranked(
            as_of,
            reports,
            self.options.top_n,
            outcome.snapshot,
        ))
    }

    async fn assemble_all(
        &self,
        tickers: Vec<(usize, Ticker)>,
        today: NaiveDate,
    ) -> Vec<(usize, Evidence)> {
        let macro_snapshot = self.assembler.fetch_macro().await;
        let assembler = &self.assembler;

        let results: Vec<(usize, Result<Evidence, EngineError>)> = stream::iter(tickers)
            .map(|(i, ticker)| {
                let macro_snapshot = macro_snapshot.clone();
                let span = tracing::info_span!("score_ticker", ticker = %ticker);
                async move {
                    let result = assembler
                        .assemble(ticker, macro_snapshot, None, today)
                        .await
                        .map_err(EngineError::from);
                    (i, result)
                }
                .instrument(span)
            })
            .buffer_unordered(self.options.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let mut assembled: Vec<(usize, Evidence)> = results
            .into_iter()
            .filter_map(|(i, result)| match result {
                Ok(evidence) => Some((i, evidence)),
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping ticker with unusable evidence");
                    None
                }
            })
            .collect();

        assembled.sort_by_key(|(i, _)| *i);
        assembled
    }
}

/// Parse and de-duplicate tickers, keeping first occurrence order.
fn parse_tickers(raw: &[String]) -> Result<Vec<Ticker>, EngineError> {
    if raw.is_empty() {
        return Err(
            EngineError::invalid_request("tickers must not be empty").with_context("field", "tickers")
        );
    }

    let mut seen = HashSet::new();
    let mut tickers = Vec::with_capacity(raw.len());
    for value in raw {
        let ticker = Ticker::parse(value)?;
        if seen.insert(ticker.clone()) {
            tickers.push(ticker);
        }
    }
    Ok(tickers)
}

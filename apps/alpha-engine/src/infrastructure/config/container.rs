//! Dependency Injection Container
//!
//! Holds the configured scoring components and builds use cases over any
//! market-data adapter. The result cache is shared by every use case the
//! container builds.

use std::sync::Arc;

use crate::application::ports::MarketDataPort;
use crate::application::services::{EvidenceAssembler, ResultCache, ScoredTicker, TickerScorer};
use crate::application::use_cases::{BatchOptions, ScoreBatchUseCase, ScoreTickerUseCase};
use crate::config::Config;
use crate::domain::decision::ContinuityBooster;
use crate::domain::options_analytics::ChainAnalyzer;
use crate::resilience::RetryPolicy;

/// Dependency injection container.
#[derive(Debug, Clone)]
pub struct EngineContainer {
    scorer: TickerScorer,
    booster: ContinuityBooster,
    retry: RetryPolicy,
    analyzer: ChainAnalyzer,
    batch: BatchOptions,
    cache: Option<Arc<ResultCache<ScoredTicker>>>,
}

impl EngineContainer {
    /// Build from a validated configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let scoring = &config.scoring;
        let cache = config
            .cache
            .enabled
            .then(|| Arc::new(ResultCache::new(config.cache.ttl())));

        Self {
            scorer: TickerScorer::new(scoring.pillars.to_weights(), scoring.gates.to_thresholds()),
            booster: ContinuityBooster::new(scoring.decision.to_thresholds()),
            retry: config.retry.to_policy(),
            analyzer: ChainAnalyzer::new(config.calendar.to_calendar(), scoring.atm_band),
            batch: BatchOptions {
                max_concurrent_fetches: config.batch.max_concurrent_fetches,
                parallel_threshold: config.batch.parallel_threshold,
                top_n: scoring.top_n,
            },
            cache,
        }
    }

    /// Get the retry policy.
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Get the batch options.
    pub const fn batch_options(&self) -> &BatchOptions {
        &self.batch
    }

    /// Get the shared result cache, if caching is enabled.
    pub fn cache(&self) -> Option<Arc<ResultCache<ScoredTicker>>> {
        self.cache.clone()
    }

    fn assembler<M: MarketDataPort>(&self, market: Arc<M>) -> EvidenceAssembler<M> {
        EvidenceAssembler::new(market, self.retry.clone(), self.analyzer.clone())
    }

    /// Create a `ScoreTickerUseCase`.
    pub fn score_ticker_use_case<M: MarketDataPort>(&self, market: Arc<M>) -> ScoreTickerUseCase<M> {
        let use_case =
            ScoreTickerUseCase::new(self.assembler(market), self.scorer, self.booster.clone());
        match &self.cache {
            Some(cache) => use_case.with_cache(Arc::clone(cache)),
            None => use_case,
        }
    }

    /// Create a `ScoreBatchUseCase`.
    pub fn score_batch_use_case<M: MarketDataPort>(&self, market: Arc<M>) -> ScoreBatchUseCase<M> {
        let use_case = ScoreBatchUseCase::new(
            self.assembler(market),
            self.scorer,
            self.booster.clone(),
            self.batch,
        );
        match &self.cache {
            Some(cache) => use_case.with_cache(Arc::clone(cache)),
            None => use_case,
        }
    }
}

impl Default for EngineContainer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_string;

    #[test]
    fn test_default_container_caches() {
        let container = EngineContainer::default();
        assert!(container.cache().is_some());
        assert_eq!(container.batch_options().top_n, 5);
        assert_eq!(container.retry_policy().max_attempts, 3);
    }

    #[test]
    fn test_container_from_config() {
        let config = load_config_from_string(
            r"
cache:
  enabled: false
batch:
  max_concurrent_fetches: 2
scoring:
  top_n: 3
retry:
  max_attempts: 1
",
        )
        .unwrap();

        let container = EngineContainer::from_config(&config);
        assert!(container.cache().is_none());
        assert_eq!(container.batch_options().max_concurrent_fetches, 2);
        assert_eq!(container.batch_options().top_n, 3);
        assert_eq!(container.retry_policy().max_attempts, 1);
    }
}

//! In-memory market data adapter.
//!
//! Serves snapshots supplied by the caller. The HTTP adapter builds one per
//! request from the inline payload; tests use it to script failures.

use std::collections::{HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{MarketDataError, MarketDataPort, SnapshotKind};
use crate::domain::shared::Ticker;

/// Raw snapshots for one ticker. `None` means the provider reports nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshots {
    /// Options chain payload.
    #[serde(default)]
    pub chain: Option<Value>,
    /// Quote payload.
    #[serde(default)]
    pub quote: Option<Value>,
    /// Short-interest payload.
    #[serde(default)]
    pub short: Option<Value>,
}

#[derive(Debug, Default)]
struct FetchCounters {
    chain: AtomicUsize,
    quote: AtomicUsize,
    macro_snapshot: AtomicUsize,
    short: AtomicUsize,
}

impl FetchCounters {
    const fn get(&self, kind: SnapshotKind) -> &AtomicUsize {
        match kind {
            SnapshotKind::Chain => &self.chain,
            SnapshotKind::Quote => &self.quote,
            SnapshotKind::Macro => &self.macro_snapshot,
            SnapshotKind::Short => &self.short,
        }
    }
}

/// In-memory implementation of `MarketDataPort`.
#[derive(Debug, Default)]
pub struct InMemoryMarketData {
    tickers: RwLock<HashMap<Ticker, TickerSnapshots>>,
    macro_snapshot: RwLock<Option<Value>>,
    failures: RwLock<HashSet<(Option<Ticker>, SnapshotKind)>>,
    latency: Option<Duration>,
    fetches: FetchCounters,
}

impl InMemoryMarketData {
    /// Create an adapter with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add snapshots for a ticker.
    #[must_use]
    pub fn with_ticker(self, ticker: &str, snapshots: TickerSnapshots) -> Self {
        self.set_ticker(ticker, snapshots);
        self
    }

    /// Set the macro snapshot.
    #[must_use]
    pub fn with_macro(self, snapshot: Value) -> Self {
        *self
            .macro_snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
        self
    }

    /// Make every fetch of `kind` for `ticker` fail with a connection error.
    #[must_use]
    pub fn with_failure(self, ticker: &str, kind: SnapshotKind) -> Self {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((Some(Ticker::new(ticker)), kind));
        self
    }

    /// Make every macro fetch fail with a connection error.
    #[must_use]
    pub fn with_macro_failure(self) -> Self {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((None, SnapshotKind::Macro));
        self
    }

    /// Delay every fetch.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Replace a ticker's snapshots.
    pub fn set_ticker(&self, ticker: &str, snapshots: TickerSnapshots) {
        self.tickers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Ticker::new(ticker), snapshots);
    }

    /// Number of fetch calls made for `kind`, retries included.
    #[must_use]
    pub fn fetch_count(&self, kind: SnapshotKind) -> usize {
        self.fetches.get(kind).load(Ordering::SeqCst)
    }

    async fn serve(
        &self,
        kind: SnapshotKind,
        ticker: Option<&Ticker>,
        select: impl FnOnce(&TickerSnapshots) -> Option<Value>,
    ) -> Result<Value, MarketDataError> {
        self.fetches.get(kind).fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let key = (ticker.cloned(), kind);
        if self
            .failures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
        {
            return Err(MarketDataError::ConnectionError {
                message: format!("scripted {kind} failure"),
            });
        }

        let not_reported = || MarketDataError::NotReported {
            kind,
            ticker: ticker.map_or_else(|| "*".to_string(), ToString::to_string),
        };

        let value = match ticker {
            Some(t) => self
                .tickers
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(t)
                .and_then(select),
            None => self
                .macro_snapshot
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };
        value.ok_or_else(not_reported)
    }
}

#[async_trait]
impl MarketDataPort for InMemoryMarketData {
    async fn fetch_options_chain(&self, ticker: &Ticker) -> Result<Value, MarketDataError> {
        self.serve(SnapshotKind::Chain, Some(ticker), |s| s.chain.clone())
            .await
    }

    async fn fetch_quote(&self, ticker: &Ticker) -> Result<Value, MarketDataError> {
        self.serve(SnapshotKind::Quote, Some(ticker), |s| s.quote.clone())
            .await
    }

    async fn fetch_macro(&self) -> Result<Value, MarketDataError> {
        self.serve(SnapshotKind::Macro, None, |_| None).await
    }

    async fn fetch_short_snapshot(&self, ticker: &Ticker) -> Result<Value, MarketDataError> {
        self.serve(SnapshotKind::Short, Some(ticker), |s| s.short.clone())
            .await
    }

    fn snapshot_fingerprint(&self, ticker: &Ticker) -> u64 {
        let render = |value: Option<&Value>| value.map(Value::to_string);

        let mut hasher = DefaultHasher::new();
        ticker.hash(&mut hasher);
        if let Some(s) = self
            .tickers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ticker)
        {
            render(s.chain.as_ref()).hash(&mut hasher);
            render(s.quote.as_ref()).hash(&mut hasher);
            render(s.short.as_ref()).hash(&mut hasher);
        }
        render(
            self.macro_snapshot
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .as_ref(),
        )
        .hash(&mut hasher);
        hasher.finish()
    }
}

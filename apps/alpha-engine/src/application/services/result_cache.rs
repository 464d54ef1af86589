//! Result Cache
//!
//! Short-lived cache of scored tickers keyed by `(ticker, epoch, fingerprint)`,
//! where the epoch is `unix_seconds / ttl` and the fingerprint identifies the
//! snapshots the value was computed from. The first writer for a key wins, so
//! concurrent callers scoring the same data within one epoch observe the same
//! value. Entries from older epochs are evicted on write.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::shared::Ticker;
use crate::observability::record_cache_lookup;

/// Cache key: one ticker's snapshots within one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Ticker.
    pub ticker: Ticker,
    /// Epoch (`unix_seconds / ttl`).
    pub epoch: u64,
    /// Fingerprint of the snapshots behind the value.
    pub fingerprint: u64,
}

/// Per-epoch cache of scored values.
#[derive(Debug)]
pub struct ResultCache<V> {
    ttl_secs: u64,
    entries: RwLock<HashMap<CacheKey, Arc<V>>>,
}

impl<V> ResultCache<V> {
    /// Create a cache with the given epoch length (at least one second).
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl_secs: ttl.as_secs().max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Epoch containing `now`.
    pub fn epoch_at(&self, now: DateTime<Utc>) -> u64 {
        (now.timestamp().max(0) as u64) / self.ttl_secs
    }

    /// Key for `ticker`'s snapshots at `now`.
    pub fn key(&self, ticker: Ticker, now: DateTime<Utc>, fingerprint: u64) -> CacheKey {
        CacheKey {
            ticker,
            epoch: self.epoch_at(now),
            fingerprint,
        }
    }

    /// Look up a cached value.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let hit = entries.get(key).cloned();
        record_cache_lookup(hit.is_some());
        if hit.is_some() {
            tracing::debug!(ticker = %key.ticker, epoch = key.epoch, "Result cache hit");
        }
        hit
    }

    /// Insert unless a value already exists; returns the value that is cached.
    pub fn insert_if_absent(&self, key: CacheKey, value: V) -> Arc<V> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|k, _| k.epoch >= key.epoch);
        Arc::clone(entries.entry(key).or_insert_with(|| Arc::new(value)))
    }

    /// Cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

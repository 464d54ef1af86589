//! Batch scoring configuration.

use serde::{Deserialize, Serialize};

/// Batch scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Tickers whose evidence is fetched concurrently.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    /// Below this many tickers scoring stays on the calling thread.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

const fn default_max_concurrent_fetches() -> usize {
    8
}

const fn default_parallel_threshold() -> usize {
    4
}

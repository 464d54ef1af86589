//! Result cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::default_true;

/// Scored-ticker cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the cache.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Epoch length in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Epoch length.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

const fn default_ttl_secs() -> u64 {
    30
}

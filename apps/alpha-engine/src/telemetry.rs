//! Tracing Setup
//!
//! Console logging through `tracing-subscriber`. `RUST_LOG` wins; otherwise
//! the configured level applies.
//!
//! # Usage
//!
//! ```rust,ignore
//! use alpha_engine::telemetry::init_telemetry;
//!
//! init_telemetry(&config.observability.logging);
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the env filter: `RUST_LOG` first, then `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize console tracing.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_telemetry(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .init();

    tracing::debug!(level = %config.level, "Console tracing initialized");
}

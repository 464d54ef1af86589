//! Configuration module for the alpha engine.
//!
//! Loads `config.yaml` (or the file named by `ALPHA_ENGINE_CONFIG`),
//! interpolates environment variables and validates the result. A missing
//! file is not an error; every section has defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use alpha_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Access configuration values
//! println!("entry threshold: {}", config.scoring.decision.entry_threshold);
//! ```

mod batch;
mod cache;
mod calendar;
mod observability;
mod retry;
mod scoring;
mod server;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use batch::BatchConfig;
pub use cache::CacheConfig;
pub use calendar::CalendarConfig;
pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use retry::RetryConfig;
pub use scoring::{DecisionConfig, GatesConfig, PillarBudgets, ScoringConfig};
pub use server::ServerConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ALPHA_ENGINE_CONFIG";

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Scoring configuration.
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Upstream retry configuration.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Result cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Batch scoring configuration.
    #[serde(default)]
    pub batch: BatchConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Exchange calendar.
    #[serde(default)]
    pub calendar: CalendarConfig,
}

pub(crate) const fn default_true() -> bool {
    true
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// The path defaults to `$ALPHA_ENGINE_CONFIG`, then `config.yaml`. When the
/// file does not exist the defaults are returned.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(
        || std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        str::to_string,
    );

    if !Path::new(&path).exists() {
        tracing::info!(path = %path, "Config file not found, using defaults");
        let config = Config::default();
        validate_config(&config)?;
        return Ok(config);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let pillars = config.scoring.pillars.to_weights();
    if pillars.total() != 100 {
        return Err(invalid(format!(
            "scoring.pillars must sum to 100 (got {})",
            pillars.total()
        )));
    }

    let gates = &config.scoring.gates;
    if gates.wall_rejection_cap > 100 || gates.fake_pump_cap > 100 {
        return Err(invalid("scoring.gates caps must be between 0 and 100"));
    }
    if gates.short_storm_penalty > 100 {
        return Err(invalid("scoring.gates.short_storm_penalty must be between 0 and 100"));
    }

    let decision = &config.scoring.decision;
    if decision.entry_threshold > 100 {
        return Err(invalid("scoring.decision.entry_threshold must be between 0 and 100"));
    }
    if decision.exit_floor >= decision.maintain_threshold {
        return Err(invalid(
            "scoring.decision.exit_floor must be below maintain_threshold",
        ));
    }
    if decision.maintain_threshold > decision.entry_threshold {
        return Err(invalid(
            "scoring.decision.maintain_threshold must not exceed entry_threshold",
        ));
    }
    if decision.slots == 0 {
        return Err(invalid("scoring.decision.slots must be positive"));
    }
    let unknown = decision.unknown_blocking_gates();
    if !unknown.is_empty() {
        return Err(invalid(format!(
            "scoring.decision.blocking_gates has unknown codes: {unknown:?}"
        )));
    }

    let band = config.scoring.atm_band;
    if !band.is_finite() || band <= 0.0 || band >= 1.0 {
        return Err(invalid("scoring.atm_band must be between 0.0 and 1.0"));
    }

    let retry = &config.retry;
    if retry.max_attempts == 0 {
        return Err(invalid("retry.max_attempts must be positive"));
    }
    if !(0.0..=1.0).contains(&retry.jitter) {
        return Err(invalid("retry.jitter must be between 0.0 and 1.0"));
    }
    if !retry.multiplier.is_finite() || retry.multiplier < 1.0 {
        return Err(invalid("retry.multiplier must be at least 1.0"));
    }
    if retry.attempt_timeout_ms == 0 {
        return Err(invalid("retry.attempt_timeout_ms must be positive"));
    }

    if config.cache.enabled && config.cache.ttl_secs == 0 {
        return Err(invalid("cache.ttl_secs must be positive when the cache is enabled"));
    }

    if config.batch.max_concurrent_fetches == 0 {
        return Err(invalid("batch.max_concurrent_fetches must be positive"));
    }

    if config.observability.metrics.enabled
        && config
            .observability
            .metrics
            .listen_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        return Err(invalid("observability.metrics.listen_addr must be a socket address"));
    }

    Ok(())
}

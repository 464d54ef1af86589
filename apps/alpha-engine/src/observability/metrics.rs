//! Prometheus metrics for the alpha engine.
//!
//! # Example
//!
//! ```ignore
//! use alpha_engine::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config)?;
//!
//! record_ticker_scored("GRA", "ENTER", 0.004);
//! ```

use std::net::{Ipv4Addr, SocketAddr};

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for scoring latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9090)),
            // 100us to 5s; the upper buckets cover retried fetches
            latency_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Scoring Metrics
// ============================================================================

/// Record one scored ticker.
///
/// # Arguments
///
/// * `completeness` - Completeness grade (`GRA`, `GRB`, `GRC`)
/// * `action` - Decided action, or `"NONE"` for single-ticker scoring
/// * `duration_seconds` - Evidence assembly plus scoring time
pub fn record_ticker_scored(completeness: &str, action: &str, duration_seconds: f64) {
    counter!(
        "alpha_tickers_scored_total",
        "completeness" => completeness.to_string(),
        "action" => action.to_string()
    )
    .increment(1);

    histogram!(
        "alpha_score_duration_seconds",
        "completeness" => completeness.to_string()
    )
    .record(duration_seconds);
}

/// Record a fired gate.
pub fn record_gate_fired(gate: &str) {
    counter!("alpha_gates_fired_total", "gate" => gate.to_string()).increment(1);
}

// ============================================================================
// Upstream & Cache Metrics
// ============================================================================

/// Record a snapshot fetch that failed after retries.
///
/// # Arguments
///
/// * `field` - Snapshot kind (`chain`, `quote`, `macro`, `short`)
/// * `reason` - `error` or `timeout`
pub fn record_upstream_failure(field: &str, reason: &str) {
    counter!(
        "alpha_upstream_failures_total",
        "field" => field.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record a result-cache lookup.
pub fn record_cache_lookup(hit: bool) {
    counter!(
        "alpha_cache_lookups_total",
        "result" => if hit { "hit" } else { "miss" }
    )
    .increment(1);
}

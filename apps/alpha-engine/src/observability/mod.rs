//! Observability module for metrics.
//!
//! Scoring, gate and upstream counters are recorded through the `metrics`
//! facade; the Prometheus exporter is optional.

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_cache_lookup, record_gate_fired,
    record_ticker_scored, record_upstream_failure,
};

// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Alpha Engine - Rust Core Library
//!
//! Deterministic scoring and decision engine for the market dashboard.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure scoring logic
//!   - `options_analytics`: GEX, gamma flip, max pain, squeeze, OPI, walls
//!   - `volatility_regime`: CALM / COILING / LOADED / ERUPTING classifier
//!   - `evidence`: Presence-tagged evidence normalized from raw snapshots
//!   - `scoring`: Five pillars, gate engine, letter grade
//!   - `decision`: Completeness grading, decision state machine, continuity booster
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`MarketDataPort`)
//!   - `services`: Evidence assembly, pure ticker scoring, result cache
//!   - `use_cases`: `ScoreTicker`, `ScoreBatch`
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `market_data`: In-memory snapshot adapter
//!   - `http`: REST API
//!   - `config`: Dependency injection container
//!
//! Cross-cutting: `config` (YAML settings), `error`, `resilience` (retry),
//! `observability` (metrics) and `telemetry` (tracing).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-Cutting Modules
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Engine error type and HTTP mapping.
pub mod error;

/// Prometheus metrics.
pub mod observability;

/// Retry with exponential backoff.
pub mod resilience;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::decision::{
    Action, CompletenessGrade, ContinuityBooster, ContinuityRecord, Decision, DecisionThresholds,
};
pub use domain::evidence::{AbsenceReason, Evidence, Observed};
pub use domain::options_analytics::{ChainAnalyzer, OptionsAnalytics, TradingCalendar};
pub use domain::scoring::{GateCode, Grade, PillarSet, PillarWeights};
pub use domain::shared::Ticker;

// Application re-exports
pub use application::dto::{
    BatchReportDto, ENGINE_VERSION, ScoreBatchRequestDto, ScoreTickerRequestDto, TickerReportDto,
};
pub use application::ports::{MarketDataError, MarketDataPort, SnapshotKind};
pub use application::services::{EvidenceAssembler, ScoredTicker, TickerScorer};
pub use application::use_cases::{BatchOptions, ScoreBatchUseCase, ScoreTickerUseCase};

// Infrastructure re-exports
pub use infrastructure::config::EngineContainer;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::market_data::{InMemoryMarketData, TickerSnapshots};

// Cross-cutting re-exports
pub use config::{Config, ConfigError, load_config};
pub use error::{EngineError, ErrorCode};

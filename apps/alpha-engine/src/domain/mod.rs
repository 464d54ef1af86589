//! Domain Layer
//!
//! Pure business logic with zero infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`options_analytics`]: Chain-derived analytics (GEX, max pain, squeeze, OPI)
//! - [`volatility_regime`]: Four-state regime classifier
//! - [`evidence`]: Typed, presence-tagged evidence from raw snapshots
//! - [`scoring`]: Five pillars, gate engine and grade
//! - [`decision`]: Completeness grading, state machine and continuity booster

pub mod decision;
pub mod evidence;
pub mod options_analytics;
pub mod scoring;
pub mod shared;
pub mod volatility_regime;

//! Volatility Regime Bounded Context
//!
//! Classifies an underlying into CALM / COILING / LOADED / ERUPTING from the
//! options analytics and squeeze score. Stateless.

mod classifier;

pub use classifier::{RegimeComponents, RegimeLabel, VolatilityRegime, classify};

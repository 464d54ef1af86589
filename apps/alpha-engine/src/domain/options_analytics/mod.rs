//! Options Chain Analytics Bounded Context
//!
//! The single canonical implementation of every chain-derived metric:
//! - Gamma exposure (net, total, flip level)
//! - Gamma concentration by expiry
//! - Max pain
//! - Squeeze risk score
//! - Options-pressure index (OPI)
//! - Call/put walls and ATM implied volatility
//!
//! All functions are pure over an immutable contract snapshot. Scoring,
//! regime classification and the HTTP layer call into this module; none of
//! them re-derive the formulas.

pub mod calendar;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use calendar::TradingCalendar;
pub use errors::AnalyticsError;
pub use services::{
    ATM_BAND, ChainAnalyzer, atm_implied_volatility, bucket_by_expiry, concentration,
    gamma_exposure, gamma_flip, max_pain, option_walls, options_pressure, pain_at, squeeze_score,
};
pub use value_objects::{
    ConcentrationLabel, ContractType, ExpiryBucket, GammaConcentration, GammaExposure, LastTrade,
    MaxPain, OptionContract, OptionWalls, OptionsAnalytics, OptionsPressure, SqueezeInputs,
    SqueezeScore, SqueezeStatus,
};

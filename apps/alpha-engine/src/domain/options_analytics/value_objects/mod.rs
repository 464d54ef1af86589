//! Options Analytics Value Objects

mod analytics;
mod expiry_bucket;
mod option_contract;

pub use analytics::{
    ConcentrationLabel, GammaConcentration, GammaExposure, MaxPain, OptionWalls,
    OptionsAnalytics, OptionsPressure, SqueezeInputs, SqueezeScore, SqueezeStatus,
};
pub use expiry_bucket::ExpiryBucket;
pub use option_contract::{CONTRACT_MULTIPLIER, ContractType, LastTrade, OptionContract};

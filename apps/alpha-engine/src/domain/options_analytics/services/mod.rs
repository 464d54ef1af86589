//! Options Analytics Domain Services

mod chain_analyzer;
mod concentration;
mod gamma_exposure;
mod max_pain;
mod pressure;
mod squeeze;
mod walls;

pub use chain_analyzer::{ATM_BAND, ChainAnalyzer};
pub use concentration::{bucket_by_expiry, concentration};
pub use gamma_exposure::{gamma_exposure, gamma_flip};
pub use max_pain::{max_pain, pain_at};
pub use pressure::options_pressure;
pub use squeeze::squeeze_score;
pub use walls::{atm_implied_volatility, option_walls};

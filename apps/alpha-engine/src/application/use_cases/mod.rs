//! Use Cases
//!
//! Application-level orchestration of scoring.

mod score_batch;
mod score_ticker;

pub use score_batch::{BatchOptions, ScoreBatchUseCase};
pub use score_ticker::ScoreTickerUseCase;

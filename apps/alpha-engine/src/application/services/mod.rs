//! Application Services
//!
//! Services shared by the scoring use cases: evidence assembly over the
//! market-data port, the pure ticker scorer and the per-epoch result cache.

mod evidence_assembler;
mod result_cache;
mod ticker_scorer;

pub use evidence_assembler::EvidenceAssembler;
pub use result_cache::{CacheKey, ResultCache};
pub use ticker_scorer::{ScoredTicker, TickerScorer};

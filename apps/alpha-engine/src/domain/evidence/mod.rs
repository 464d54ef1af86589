//! Evidence Bounded Context
//!
//! Normalizes heterogeneous upstream snapshots (quote, options chain, macro,
//! short interest) into one typed [`Evidence`] record per ticker. Every field
//! is tagged [`Observed::Present`] or [`Observed::Absent`] with a reason, so
//! scoring never mistakes missing data for a real zero.

mod evidence;
mod normalize;
mod observed;

pub use evidence::{
    Evidence, FlowEvidence, MacroEvidence, OptionsState, PriceEvidence, ShortEvidence,
};
pub use normalize::{
    NormalizedChain, RawSnapshots, build_evidence, normalize_chain, normalize_macro,
    normalize_quote, normalize_short, parse_contract,
};
pub use observed::{AbsenceReason, Observed};

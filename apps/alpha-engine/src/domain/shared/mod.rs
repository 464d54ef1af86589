//! Shared Domain Types
//!
//! Value objects and errors shared across bounded contexts.

pub mod errors;
pub mod ticker;

pub use errors::DomainError;
pub use ticker::Ticker;

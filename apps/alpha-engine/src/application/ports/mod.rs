//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.

mod market_data_port;

pub use market_data_port::{MarketDataError, MarketDataPort, SnapshotKind};

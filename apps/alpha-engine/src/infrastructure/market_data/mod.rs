//! Market data adapters.
//!
//! Implementations of [`MarketDataPort`](crate::application::ports::MarketDataPort).

mod in_memory;

pub use in_memory::{InMemoryMarketData, TickerSnapshots};

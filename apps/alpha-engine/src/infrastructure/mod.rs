//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `market_data/`: Snapshot providers (in-memory, caller-supplied)
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers
//!
//! - **Wiring**
//!   - `config/`: Builds use cases from the loaded configuration

pub mod config;
pub mod http;
pub mod market_data;

//! Application Layer
//!
//! Use cases and orchestration. This layer depends on the domain layer
//! and defines ports for infrastructure adapters.

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;

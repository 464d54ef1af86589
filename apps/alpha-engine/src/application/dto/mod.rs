//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod report_dto;
mod request_dto;

pub use report_dto::{BatchReportDto, ENGINE_VERSION, TickerReportDto, TopEntryDto};
pub use request_dto::{ScoreBatchRequestDto, ScoreTickerRequestDto};

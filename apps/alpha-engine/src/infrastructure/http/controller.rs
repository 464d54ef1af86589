//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the scoring use cases. Scoring runs
//! on a spawned task, so a client that disconnects does not cancel fetches
//! already in flight.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use chrono::Utc;

use crate::application::dto::{BatchReportDto, ENGINE_VERSION, TickerReportDto};
use crate::infrastructure::config::EngineContainer;

use super::request::{ScoreBatchRequest, ScoreRequest};
use super::response::{ApiError, HealthResponse};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Configured scoring components.
    pub container: Arc<EngineContainer>,
    /// Application version.
    pub version: String,
}

impl AppState {
    /// Create state for `container` with the crate version.
    #[must_use]
    pub fn new(container: EngineContainer) -> Self {
        Self {
            container: Arc::new(container),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/score", post(score_ticker))
        .route("/api/v1/score-batch", post(score_batch))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        engine_version: ENGINE_VERSION.to_string(),
    })
}

/// Score a single ticker.
async fn score_ticker(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<TickerReportDto>, ApiError> {
    let Json(request) = payload?;
    let (market, dto) = request.into_parts();
    let use_case = state.container.score_ticker_use_case(Arc::new(market));
    let now = Utc::now();

    let report = tokio::spawn(async move { use_case.execute(dto, now).await })
        .await
        .map_err(|e| ApiError::internal(format!("Scoring task failed: {e}")))??;
    Ok(Json(report))
}

/// Score and rank a batch.
async fn score_batch(
    State(state): State<AppState>,
    payload: Result<Json<ScoreBatchRequest>, JsonRejection>,
) -> Result<Json<BatchReportDto>, ApiError> {
    let Json(request) = payload?;
    let (market, dto) = request.into_parts();
    let use_case = state.container.score_batch_use_case(Arc::new(market));
    let now = Utc::now();

    let report = tokio::spawn(async move { use_case.execute(dto, now).await })
        .await
        .map_err(|e| ApiError::internal(format!("Batch task failed: {e}")))??;
    Ok(Json(report))
}

//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::AnalysisService;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub artifacts: usize,
    pub dataset: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let analysis = AnalysisService::new(state.config.dataset.path.clone());
    let dataset_status = if analysis.dataset_present() {
        "present".to_string()
    } else {
        "missing".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        artifacts: state.predictor.artifact_count(),
        dataset: dataset_status,
    })
}

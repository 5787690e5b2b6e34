//! HTTP handlers for the prediction view

use axum::{extract::State, Json};
use shared::RawObservation;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::prediction::{PredictionOptions, PredictionResponse, PredictionService};
use crate::AppState;

/// Predict whether it will rain tomorrow
pub async fn predict(
    State(state): State<AppState>,
    AppJson(observation): AppJson<RawObservation>,
) -> AppResult<Json<PredictionResponse>> {
    let service = PredictionService::new(state.predictor.clone());
    let response = service.predict(&observation)?;
    Ok(Json(response))
}

/// Vocabularies and numeric bounds for the input widgets
pub async fn get_prediction_options(
    State(state): State<AppState>,
) -> AppResult<Json<PredictionOptions>> {
    let service = PredictionService::new(state.predictor.clone());
    Ok(Json(service.options()?))
}

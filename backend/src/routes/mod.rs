//! Route definitions for the rain dashboard API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/prediction", prediction_routes())
        .nest("/analysis", analysis_routes())
}

/// Prediction view routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::predict))
        .route("/options", get(handlers::get_prediction_options))
}

/// Rain analysis view routes
fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_analysis))
        .route("/options", get(handlers::get_analysis_options))
}

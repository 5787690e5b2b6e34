//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rain_dashboard_backend::{
    config::{ArtifactsConfig, DatasetConfig},
    create_app,
    services::ArtifactStore,
    AppState, Config,
};
use serde_json::Value;
use tower::ServiceExt;

pub fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Router over the fixture artifacts and the given dataset file
pub fn app_with_dataset(dataset: PathBuf) -> Router {
    let artifacts = fixtures().join("artifacts");
    let config = Config {
        artifacts: ArtifactsConfig {
            dir: artifacts.clone(),
        },
        dataset: DatasetConfig { path: dataset },
        ..Config::default()
    };
    let predictor = ArtifactStore::new(artifacts)
        .load()
        .expect("fixture artifacts load");

    create_app(AppState {
        config: Arc::new(config),
        predictor: Arc::new(predictor),
    })
}

pub fn app() -> Router {
    app_with_dataset(fixtures().join("weather.csv"))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

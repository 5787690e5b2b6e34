//! Prediction API integration tests
//!
//! Drives the router against the fixture artifacts in `tests/fixtures`.

mod common;

use axum::http::StatusCode;
use proptest::prelude::*;
use serde_json::{json, Value};

use common::{app, get, post_json};

fn sydney() -> Value {
    json!({
        "location": "Sydney",
        "rainfall": 0.0,
        "wind_gust_dir": "N",
        "wind_gust_speed": 20.0,
        "wind_dir_9am": "N",
        "wind_dir_3pm": "N",
        "humidity_9am": 50.0,
        "humidity_3pm": 50.0,
        "cloud_9am": 4.0,
        "cloud_3pm": 4.0,
        "rain_today": "No",
        "risk_mm": 0.0
    })
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_health_reports_artifacts() {
    let (status, body) = get(app(), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["artifacts"], 11);
    assert_eq!(body["dataset"], "present");
}

#[tokio::test]
async fn test_prediction_options() {
    let (status, body) = get(app(), "/api/v1/prediction/options").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["vocabularies"]["Location"],
        json!(["Albury", "Melbourne", "Perth", "Sydney"])
    );
    assert_eq!(body["vocabularies"]["RainToday"], json!(["No", "Yes"]));
    let numeric = body["numeric"].as_array().unwrap();
    assert_eq!(numeric.len(), 7);
    assert_eq!(numeric[0]["field"], "Rainfall");
    assert_eq!(numeric[1]["default"], 20.0);
}

#[tokio::test]
async fn test_sydney_example_is_deterministic() {
    let (status, first) = post_json(app(), "/api/v1/prediction", &sydney()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["label"], 0);
    assert_eq!(first["rain_tomorrow"], false);
    assert_eq!(first["message"], "No Rain Tomorrow!");

    let (_, second) = post_json(app(), "/api/v1/prediction", &sydney()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_humid_afternoon_predicts_rain() {
    let mut observation = sydney();
    observation["humidity_3pm"] = json!(90.0);
    let (status, body) = post_json(app(), "/api/v1/prediction", &observation).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], 1);
    assert_eq!(body["message"], "It will RAIN Tomorrow!");
    let probability = body["rain_probability"].as_f64().unwrap();
    assert!((probability - 20.0 / 22.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_location_is_unprocessable() {
    let mut observation = sydney();
    observation["location"] = json!("Atlantis");
    let (status, body) = post_json(app(), "/api/v1/prediction", &observation).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "UNKNOWN_CATEGORY");
    assert_eq!(body["error"]["field"], "Location");
}

#[tokio::test]
async fn test_out_of_range_humidity_is_rejected() {
    let mut observation = sydney();
    observation["humidity_3pm"] = json!(150.0);
    let (status, body) = post_json(app(), "/api/v1/prediction", &observation).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "Humidity3pm");
}

#[tokio::test]
async fn test_unknown_direction_and_rain_today_are_unprocessable() {
    let cases = [
        ("rain_today", "Maybe", "RainToday"),
        ("wind_gust_dir", "NNE", "WindGustDir"),
        ("wind_dir_9am", "NNE", "WindDir9am"),
        ("wind_dir_3pm", "NNE", "WindDir3pm"),
    ];
    for (key, value, field) in cases {
        let mut observation = sydney();
        observation[key] = json!(value);
        let (status, body) = post_json(app(), "/api/v1/prediction", &observation).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{key}");
        assert_eq!(body["error"]["code"], "UNKNOWN_CATEGORY");
        assert_eq!(body["error"]["field"], field);
    }
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let mut observation = sydney();
    observation.as_object_mut().unwrap().remove("rain_today");
    let (status, body) = post_json(app(), "/api/v1/prediction", &observation).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "body");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("rain_today"));
}

#[tokio::test]
async fn test_wrong_type_is_rejected_as_json() {
    let mut observation = sydney();
    observation["rainfall"] = json!("lots");
    let (status, body) = post_json(app(), "/api/v1/prediction", &observation).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_liveness_and_dashboard() {
    let (status, _) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Property Tests
// ============================================================================

fn direction() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["E", "N", "S", "W"])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any in-vocabulary, in-range observation yields a 0/1 label
    #[test]
    fn prop_known_inputs_always_predict(
        location in prop::sample::select(vec!["Albury", "Melbourne", "Perth", "Sydney"]),
        gust_dir in direction(),
        dir_9am in direction(),
        dir_3pm in direction(),
        rain_today in prop::sample::select(vec!["No", "Yes"]),
        rainfall in 0.0f64..500.0,
        humidity_3pm in 0.0f64..100.0,
        cloud_9am in 0.0f64..9.0
    ) {
        let observation = json!({
            "location": location,
            "rainfall": rainfall,
            "wind_gust_dir": gust_dir,
            "wind_gust_speed": 35.0,
            "wind_dir_9am": dir_9am,
            "wind_dir_3pm": dir_3pm,
            "humidity_9am": 60.0,
            "humidity_3pm": humidity_3pm,
            "cloud_9am": cloud_9am,
            "cloud_3pm": 4.0,
            "rain_today": rain_today,
            "risk_mm": 0.0
        });
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (status, body) =
            runtime.block_on(post_json(app(), "/api/v1/prediction", &observation));
        prop_assert_eq!(status, StatusCode::OK);
        let label = body["label"].as_u64().unwrap();
        prop_assert!(label == 0 || label == 1);
    }
}

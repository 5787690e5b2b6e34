//! WebAssembly bindings for the rain dashboard
//!
//! Provides client-side computation for:
//! - Next-day rain prediction from a full artifact bundle
//! - Offline input validation
//! - Rain summary messages for the analysis view

use shared::analysis;
use shared::{validate_observation, ArtifactBundle, PredictionContext, RawObservation};
use wasm_bindgen::prelude::*;

/// Write a line to the browser console
fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn context_from_json(artifacts_json: &str) -> Result<PredictionContext, String> {
    let bundle: ArtifactBundle = serde_json::from_str(artifacts_json)
        .map_err(|e| format!("Invalid artifacts JSON: {}", e))?;
    PredictionContext::from_bundle(bundle).map_err(|e| e.to_string())
}

fn predict_from_json(artifacts_json: &str, observation_json: &str) -> Result<u8, String> {
    let context = context_from_json(artifacts_json)?;
    let observation: RawObservation = serde_json::from_str(observation_json)
        .map_err(|e| format!("Invalid observation JSON: {}", e))?;
    validate_observation(&observation).map_err(|v| v.to_string())?;

    let prediction = context.predict(&observation).map_err(|e| e.to_string())?;
    log(prediction.message());
    Ok(prediction.label())
}

/// Predict next-day rain; returns 1 for rain and 0 for no rain
#[wasm_bindgen]
pub fn predict_rain(artifacts_json: &str, observation_json: &str) -> Result<u8, JsValue> {
    predict_from_json(artifacts_json, observation_json).map_err(|e| JsValue::from_str(&e))
}

/// Check an observation before sending it to the server
#[wasm_bindgen]
pub fn validate_observation_json(observation_json: &str) -> bool {
    match serde_json::from_str::<RawObservation>(observation_json) {
        Ok(observation) => match validate_observation(&observation) {
            Ok(()) => true,
            Err(violation) => {
                log(&violation.to_string());
                false
            }
        },
        Err(_) => false,
    }
}

/// Message shown above the analysis charts
#[wasm_bindgen]
pub fn rain_summary_message(matched: usize, rain_days: usize) -> String {
    analysis::rain_summary_message(matched, rain_days)
}

/// Fitted vocabulary of one categorical column, for populating selectors
#[wasm_bindgen]
pub fn vocabulary(artifacts_json: &str, column: &str) -> Result<js_sys::Array, JsValue> {
    let context = context_from_json(artifacts_json).map_err(|e| JsValue::from_str(&e))?;
    let classes = context
        .vocabulary(column)
        .ok_or_else(|| JsValue::from_str(&format!("No label encoder for {}", column)))?;
    Ok(classes.iter().map(|class| JsValue::from_str(class)).collect())
}

//! Next-day rain prediction service

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use shared::{
    columns, validate_observation, NumericInput, PredictionContext, RawObservation,
    NUMERIC_INPUTS,
};

use crate::error::{AppError, AppResult};

/// Prediction service over the loaded artifacts
#[derive(Clone)]
pub struct PredictionService {
    context: Arc<PredictionContext>,
}

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// 1 for rain, 0 for no rain
    pub label: u8,
    pub rain_tomorrow: bool,
    pub rain_probability: f64,
    pub message: String,
}

/// Inputs the prediction view offers
#[derive(Debug, Serialize)]
pub struct PredictionOptions {
    /// Fitted vocabulary per categorical column
    pub vocabularies: BTreeMap<String, Vec<String>>,
    pub numeric: Vec<NumericInput>,
}

impl PredictionService {
    pub fn new(context: Arc<PredictionContext>) -> Self {
        Self { context }
    }

    pub fn predict(&self, observation: &RawObservation) -> AppResult<PredictionResponse> {
        validate_observation(observation)?;

        let outcome = self.context.predict_outcome(observation)?;
        tracing::info!(
            location = %observation.location,
            label = outcome.prediction.label(),
            "Predicted next-day rain"
        );

        Ok(PredictionResponse {
            label: outcome.prediction.label(),
            rain_tomorrow: outcome.prediction.is_rain(),
            rain_probability: outcome.rain_probability,
            message: outcome.prediction.message().to_string(),
        })
    }

    pub fn options(&self) -> AppResult<PredictionOptions> {
        let mut vocabularies = BTreeMap::new();
        for column in columns::CATEGORICAL {
            let classes = self.context.vocabulary(column).ok_or_else(|| {
                AppError::Internal(format!("No label encoder loaded for {}", column))
            })?;
            vocabularies.insert(column.to_string(), classes.to_vec());
        }
        Ok(PredictionOptions {
            vocabularies,
            numeric: NUMERIC_INPUTS.to_vec(),
        })
    }
}

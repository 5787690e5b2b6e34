//! Input validation for the prediction and analysis views

use serde::Serialize;

use crate::analysis::AnalysisFilter;
use crate::models::RawObservation;
use crate::types::columns;

// ============================================================================
// Numeric input bounds
// ============================================================================

/// Allowed range and initial value of a numeric prediction input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericInput {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl NumericInput {
    const fn new(field: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            field,
            min,
            max,
            default,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

pub const NUMERIC_INPUTS: [NumericInput; 7] = [
    NumericInput::new(columns::RAINFALL, 0.0, 500.0, 0.0),
    NumericInput::new(columns::WIND_GUST_SPEED, 0.0, 150.0, 20.0),
    NumericInput::new(columns::HUMIDITY_9AM, 0.0, 100.0, 50.0),
    NumericInput::new(columns::HUMIDITY_3PM, 0.0, 100.0, 50.0),
    NumericInput::new(columns::CLOUD_9AM, 0.0, 9.0, 4.0),
    NumericInput::new(columns::CLOUD_3PM, 0.0, 9.0, 4.0),
    NumericInput::new(columns::RISK_MM, 0.0, 500.0, 0.0),
];

pub fn numeric_input(field: &str) -> Option<&'static NumericInput> {
    NUMERIC_INPUTS.iter().find(|input| input.field == field)
}

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ============================================================================
// Prediction Validations
// ============================================================================

/// Validate a numeric input against its dashboard bounds
pub fn validate_numeric(field: &str, value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Value must be a finite number");
    }
    match numeric_input(field) {
        Some(input) if !input.contains(value) => Err("Value is outside the allowed range"),
        _ => Ok(()),
    }
}

/// Validate that a categorical input was provided
pub fn validate_category(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Value must not be empty");
    }
    Ok(())
}

/// Validate every field of an observation, reporting the first violation
///
/// Vocabulary membership is left to the label encoders.
pub fn validate_observation(observation: &RawObservation) -> Result<(), FieldViolation> {
    let categorical = [
        (columns::LOCATION, observation.location.as_str()),
        (columns::WIND_GUST_DIR, observation.wind_gust_dir.as_str()),
        (columns::WIND_DIR_9AM, observation.wind_dir_9am.as_str()),
        (columns::WIND_DIR_3PM, observation.wind_dir_3pm.as_str()),
        (columns::RAIN_TODAY, observation.rain_today.as_str()),
    ];
    for (field, value) in categorical {
        validate_category(value).map_err(|message| FieldViolation::new(field, message))?;
    }

    let numeric = [
        (columns::RAINFALL, observation.rainfall),
        (columns::WIND_GUST_SPEED, observation.wind_gust_speed),
        (columns::HUMIDITY_9AM, observation.humidity_9am),
        (columns::HUMIDITY_3PM, observation.humidity_3pm),
        (columns::CLOUD_9AM, observation.cloud_9am),
        (columns::CLOUD_3PM, observation.cloud_3pm),
        (columns::RISK_MM, observation.risk_mm),
    ];
    for (field, value) in numeric {
        validate_numeric(field, value).map_err(|message| FieldViolation::new(field, message))?;
    }
    Ok(())
}

// ============================================================================
// Analysis Validations
// ============================================================================

pub fn validate_month(month: u32) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(())
}

pub fn validate_day(day: u32) -> Result<(), &'static str> {
    if !(1..=31).contains(&day) {
        return Err("Day must be between 1 and 31");
    }
    Ok(())
}

/// Validate analysis filter parameters; a filter that matches nothing is valid
pub fn validate_filter(filter: &AnalysisFilter) -> Result<(), FieldViolation> {
    validate_category(&filter.location)
        .map_err(|message| FieldViolation::new("location", message))?;
    validate_month(filter.month).map_err(|message| FieldViolation::new("month", message))?;
    if let Some(day) = filter.day {
        validate_day(day).map_err(|message| FieldViolation::new("day", message))?;
    }
    Ok(())
}

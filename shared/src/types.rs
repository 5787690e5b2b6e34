//! Common types used across the dashboard
//!
//! The prediction pipeline works on a single-row table keyed by the column
//! names the artifacts were fitted with. [`FeatureRow`] is that table.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Training-time column names, in the order the classifier expects them
pub mod columns {
    pub const LOCATION: &str = "Location";
    pub const RAINFALL: &str = "Rainfall";
    pub const WIND_GUST_DIR: &str = "WindGustDir";
    pub const WIND_GUST_SPEED: &str = "WindGustSpeed";
    pub const WIND_DIR_9AM: &str = "WindDir9am";
    pub const WIND_DIR_3PM: &str = "WindDir3pm";
    pub const HUMIDITY_9AM: &str = "Humidity9am";
    pub const HUMIDITY_3PM: &str = "Humidity3pm";
    pub const CLOUD_9AM: &str = "Cloud9am";
    pub const CLOUD_3PM: &str = "Cloud3pm";
    pub const RAIN_TODAY: &str = "RainToday";
    pub const RISK_MM: &str = "RISK_MM";

    /// Categorical columns in the order their encoders are applied
    pub const CATEGORICAL: [&str; 5] = [RAIN_TODAY, LOCATION, WIND_GUST_DIR, WIND_DIR_9AM, WIND_DIR_3PM];
}

/// A single cell of a [`FeatureRow`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            Cell::Number(_) => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Ordered single-row table of named cells
///
/// Column order is preserved exactly as pushed; transformers read and write
/// cells by name and never reorder or drop columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureRow {
    columns: Vec<(String, Cell)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. A later push with an existing name replaces the cell
    /// in place.
    pub fn push(&mut self, name: impl Into<String>, cell: impl Into<Cell>) {
        let name = name.into();
        let cell = cell.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = cell,
            None => self.columns.push((name, cell)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.push(name, cell);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, cell)| cell)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Numeric value of a column
    pub fn number(&self, name: &str) -> Result<f64, PipelineError> {
        self.get(name)
            .ok_or_else(|| PipelineError::MissingField(name.to_string()))?
            .as_number()
            .ok_or_else(|| PipelineError::NonNumericValue {
                field: name.to_string(),
            })
    }

    /// Copy out the cells of `fields`, in the order given
    pub fn select(&self, fields: &[String]) -> Result<Vec<Cell>, PipelineError> {
        fields
            .iter()
            .map(|field| {
                self.get(field)
                    .cloned()
                    .ok_or_else(|| PipelineError::MissingField(field.clone()))
            })
            .collect()
    }

    /// Write `cells` back into `fields`. Both slices must be the same length
    /// and every field must already exist.
    pub fn replace(&mut self, fields: &[String], cells: Vec<Cell>) -> Result<(), PipelineError> {
        if fields.len() != cells.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: fields.len(),
                found: cells.len(),
            });
        }
        for (field, cell) in fields.iter().zip(cells) {
            let slot = self
                .columns
                .iter_mut()
                .find(|(existing, _)| existing == field)
                .ok_or_else(|| PipelineError::MissingField(field.clone()))?;
            slot.1 = cell;
        }
        Ok(())
    }
}

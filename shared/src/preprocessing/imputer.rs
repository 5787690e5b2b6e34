//! Missing-value imputation

use serde::{Deserialize, Serialize};

use super::{check_len, numeric_cells, FittedTransformer};
use crate::error::PipelineError;
use crate::types::Cell;

/// Strategy the imputer was fitted with. Only informational at inference
/// time: the fitted `statistics` already hold the fill values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    Mean,
    Median,
    MostFrequent,
    Constant,
}

/// Replaces NaN cells of its declared fields with fitted statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleImputer {
    pub feature_names_in: Vec<String>,
    pub strategy: ImputeStrategy,
    /// One fill value per declared field
    pub statistics: Vec<f64>,
}

impl SimpleImputer {
    pub(crate) fn check(&self) -> Result<(), String> {
        check_len("statistics", &self.feature_names_in, &self.statistics)
    }
}

impl FittedTransformer for SimpleImputer {
    fn declared_fields(&self) -> &[String] {
        &self.feature_names_in
    }

    fn transform(&self, cells: &[Cell]) -> Result<Vec<Cell>, PipelineError> {
        let values = numeric_cells(&self.feature_names_in, cells)?;
        Ok(values
            .into_iter()
            .zip(&self.statistics)
            .map(|(value, fill)| Cell::Number(if value.is_nan() { *fill } else { value }))
            .collect())
    }
}

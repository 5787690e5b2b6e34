//! Standard and min-max scaling

use serde::{Deserialize, Serialize};

use super::{check_len, numeric_cells, FittedTransformer};
use crate::error::PipelineError;
use crate::types::Cell;

/// `(x - mean) / scale` per declared field
///
/// `mean` is absent when the scaler was fitted without centering and `scale`
/// when it was fitted without scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names_in: Vec<String>,
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl StandardScaler {
    pub(crate) fn check(&self) -> Result<(), String> {
        if let Some(mean) = &self.mean {
            check_len("mean", &self.feature_names_in, mean)?;
        }
        if let Some(scale) = &self.scale {
            check_len("scale", &self.feature_names_in, scale)?;
            if scale.iter().any(|s| *s == 0.0) {
                return Err("scale contains zero".to_string());
            }
        }
        Ok(())
    }

    fn scale_one(&self, index: usize, value: f64) -> f64 {
        let centered = match &self.mean {
            Some(mean) => value - mean[index],
            None => value,
        };
        match &self.scale {
            Some(scale) => centered / scale[index],
            None => centered,
        }
    }
}

impl FittedTransformer for StandardScaler {
    fn declared_fields(&self) -> &[String] {
        &self.feature_names_in
    }

    fn transform(&self, cells: &[Cell]) -> Result<Vec<Cell>, PipelineError> {
        let values = numeric_cells(&self.feature_names_in, cells)?;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Cell::Number(self.scale_one(i, value)))
            .collect())
    }
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Rescales each declared field from its fitted data range into
/// `feature_range`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub feature_names_in: Vec<String>,
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
    #[serde(default)]
    pub clip: bool,
}

impl MinMaxScaler {
    pub(crate) fn check(&self) -> Result<(), String> {
        check_len("data_min", &self.feature_names_in, &self.data_min)?;
        check_len("data_max", &self.feature_names_in, &self.data_max)?;
        let (lo, hi) = self.feature_range;
        if !(lo < hi) {
            return Err(format!("feature_range ({}, {}) is empty", lo, hi));
        }
        if self
            .data_min
            .iter()
            .zip(&self.data_max)
            .any(|(min, max)| min > max)
        {
            return Err("data_min exceeds data_max".to_string());
        }
        Ok(())
    }

    /// Fitted `(scale, offset)` for field `index`; a constant column is
    /// treated as having unit range
    fn coefficients(&self, index: usize) -> (f64, f64) {
        let (lo, hi) = self.feature_range;
        let range = self.data_max[index] - self.data_min[index];
        let range = if range == 0.0 { 1.0 } else { range };
        let scale = (hi - lo) / range;
        (scale, lo - self.data_min[index] * scale)
    }
}

impl FittedTransformer for MinMaxScaler {
    fn declared_fields(&self) -> &[String] {
        &self.feature_names_in
    }

    fn transform(&self, cells: &[Cell]) -> Result<Vec<Cell>, PipelineError> {
        let values = numeric_cells(&self.feature_names_in, cells)?;
        let (lo, hi) = self.feature_range;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let (scale, offset) = self.coefficients(i);
                let scaled = value * scale + offset;
                Cell::Number(if self.clip { scaled.clamp(lo, hi) } else { scaled })
            })
            .collect())
    }
}

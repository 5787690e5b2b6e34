//! Power transforms (Yeo-Johnson, Box-Cox)

use serde::{Deserialize, Serialize};

use super::{check_len, numeric_cells, FittedTransformer};
use crate::error::PipelineError;
use crate::types::Cell;

/// Lambdas this close to a singular point use the logarithmic branch
const LAMBDA_EPS: f64 = f64::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerMethod {
    YeoJohnson,
    BoxCox,
}

/// Post-transform standardization fitted together with the lambdas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Per-field monotonic power transform with fitted lambdas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerTransformer {
    pub feature_names_in: Vec<String>,
    pub method: PowerMethod,
    pub lambdas: Vec<f64>,
    #[serde(default)]
    pub standardizer: Option<Standardizer>,
}

impl PowerTransformer {
    pub(crate) fn check(&self) -> Result<(), String> {
        check_len("lambdas", &self.feature_names_in, &self.lambdas)?;
        if let Some(standardizer) = &self.standardizer {
            check_len("standardizer.mean", &self.feature_names_in, &standardizer.mean)?;
            check_len("standardizer.scale", &self.feature_names_in, &standardizer.scale)?;
            if standardizer.scale.iter().any(|s| *s == 0.0) {
                return Err("standardizer.scale contains zero".to_string());
            }
        }
        Ok(())
    }

    fn transform_one(&self, index: usize, value: f64) -> Result<f64, PipelineError> {
        let lambda = self.lambdas[index];
        let transformed = match self.method {
            PowerMethod::YeoJohnson => yeo_johnson(value, lambda),
            PowerMethod::BoxCox => {
                if value <= 0.0 {
                    return Err(PipelineError::OutOfDomain {
                        field: self.feature_names_in[index].clone(),
                        value,
                    });
                }
                box_cox(value, lambda)
            }
        };
        Ok(match &self.standardizer {
            Some(s) => (transformed - s.mean[index]) / s.scale[index],
            None => transformed,
        })
    }
}

impl FittedTransformer for PowerTransformer {
    fn declared_fields(&self) -> &[String] {
        &self.feature_names_in
    }

    fn transform(&self, cells: &[Cell]) -> Result<Vec<Cell>, PipelineError> {
        let values = numeric_cells(&self.feature_names_in, cells)?;
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| self.transform_one(i, value).map(Cell::Number))
            .collect()
    }
}

/// Yeo-Johnson transform of a single value
pub fn yeo_johnson(x: f64, lambda: f64) -> f64 {
    if x >= 0.0 {
        if lambda.abs() < LAMBDA_EPS {
            x.ln_1p()
        } else {
            ((x + 1.0).powf(lambda) - 1.0) / lambda
        }
    } else if (lambda - 2.0).abs() < LAMBDA_EPS {
        -(-x).ln_1p()
    } else {
        -((1.0 - x).powf(2.0 - lambda) - 1.0) / (2.0 - lambda)
    }
}

/// Box-Cox transform of a strictly positive value
pub fn box_cox(x: f64, lambda: f64) -> f64 {
    if lambda.abs() < LAMBDA_EPS {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

//! Fitted feature transformers
//!
//! Every preprocessing artifact is one variant of [`TransformerArtifact`] and
//! implements [`FittedTransformer`]: it declares the columns it consumes and
//! maps a same-shape slice of cells. Transformers are read-only once loaded.

mod imputer;
mod label_encoder;
mod power;
mod scaler;

pub use imputer::{ImputeStrategy, SimpleImputer};
pub use label_encoder::LabelEncoder;
pub use power::{PowerMethod, PowerTransformer, Standardizer};
pub use scaler::{MinMaxScaler, StandardScaler};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::types::{Cell, FeatureRow};

/// Common contract of every fitted transformer
pub trait FittedTransformer {
    /// Columns this transformer consumes, in fit order
    fn declared_fields(&self) -> &[String];

    /// Transform the cells of the declared fields
    fn transform(&self, cells: &[Cell]) -> Result<Vec<Cell>, PipelineError>;

    /// Apply to a row in place, touching only the declared fields
    fn apply(&self, row: &mut FeatureRow) -> Result<(), PipelineError> {
        let fields = self.declared_fields();
        let subset = row.select(fields)?;
        let transformed = self.transform(&subset)?;
        row.replace(fields, transformed)
    }
}

/// A persisted transformer, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformerArtifact {
    LabelEncoder(LabelEncoder),
    SimpleImputer(SimpleImputer),
    StandardScaler(StandardScaler),
    MinMaxScaler(MinMaxScaler),
    PowerTransformer(PowerTransformer),
}

impl TransformerArtifact {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TransformerArtifact::LabelEncoder(_) => "label_encoder",
            TransformerArtifact::SimpleImputer(_) => "simple_imputer",
            TransformerArtifact::StandardScaler(_) => "standard_scaler",
            TransformerArtifact::MinMaxScaler(_) => "min_max_scaler",
            TransformerArtifact::PowerTransformer(_) => "power_transformer",
        }
    }

    /// Check internal consistency of the fitted parameters
    pub fn check(&self) -> Result<(), String> {
        match self {
            TransformerArtifact::LabelEncoder(t) => t.check(),
            TransformerArtifact::SimpleImputer(t) => t.check(),
            TransformerArtifact::StandardScaler(t) => t.check(),
            TransformerArtifact::MinMaxScaler(t) => t.check(),
            TransformerArtifact::PowerTransformer(t) => t.check(),
        }
    }

    fn inner(&self) -> &dyn FittedTransformer {
        match self {
            TransformerArtifact::LabelEncoder(t) => t,
            TransformerArtifact::SimpleImputer(t) => t,
            TransformerArtifact::StandardScaler(t) => t,
            TransformerArtifact::MinMaxScaler(t) => t,
            TransformerArtifact::PowerTransformer(t) => t,
        }
    }
}

impl FittedTransformer for TransformerArtifact {
    fn declared_fields(&self) -> &[String] {
        self.inner().declared_fields()
    }

    fn transform(&self, cells: &[Cell]) -> Result<Vec<Cell>, PipelineError> {
        self.inner().transform(cells)
    }
}

/// Read the declared cells as numbers, failing on text
pub(crate) fn numeric_cells(fields: &[String], cells: &[Cell]) -> Result<Vec<f64>, PipelineError> {
    if fields.len() != cells.len() {
        return Err(PipelineError::ShapeMismatch {
            expected: fields.len(),
            found: cells.len(),
        });
    }
    fields
        .iter()
        .zip(cells)
        .map(|(field, cell)| {
            cell.as_number().ok_or_else(|| PipelineError::NonNumericValue {
                field: field.clone(),
            })
        })
        .collect()
}

/// Shared parameter-length check used by the numeric transformers
pub(crate) fn check_len(what: &str, fields: &[String], values: &[f64]) -> Result<(), String> {
    if values.len() != fields.len() {
        return Err(format!(
            "{} has {} values for {} declared fields",
            what,
            values.len(),
            fields.len()
        ));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(format!("{} contains non-finite values", what));
    }
    Ok(())
}

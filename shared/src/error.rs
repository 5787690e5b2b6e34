//! Error types for the prediction pipeline and artifact loading

use thiserror::Error;

/// Failure while pushing one observation through the fitted pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Unknown category {value:?} for field {field}")]
    UnknownCategory { field: String, value: String },

    #[error("Field {0} is missing from the feature row")]
    MissingField(String),

    #[error("Field {field} expected a numeric value")]
    NonNumericValue { field: String },

    #[error("Field {field} expected a categorical value")]
    NonCategoricalValue { field: String },

    #[error("Feature {0} was not seen when the classifier was fitted")]
    UnexpectedFeature(String),

    #[error("Classifier produced unsupported label {0}")]
    UnsupportedLabel(i64),

    #[error("Value {value} for field {field} is outside the transformer's domain")]
    OutOfDomain { field: String, value: f64 },

    #[error("Transformer expected {expected} values but received {found}")]
    ShapeMismatch { expected: usize, found: usize },
}

/// Failure while assembling the prediction context from fitted artifacts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifactError {
    #[error("Artifact {0} is missing")]
    Missing(String),

    #[error("Artifact {name} should be a {expected} but is a {found}")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Artifact {name} is invalid: {reason}")]
    Invalid { name: String, reason: String },
}

impl ArtifactError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

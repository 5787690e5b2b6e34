//! Label encoding of a single categorical column

use serde::{Deserialize, Serialize};

use super::FittedTransformer;
use crate::error::PipelineError;
use crate::types::Cell;

/// Maps a fixed, sorted vocabulary to integer codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Column this encoder was fitted on
    pub column: String,

    /// Vocabulary, strictly ascending; the code of a class is its index
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(column: impl Into<String>, classes: Vec<String>) -> Self {
        Self {
            column: column.into(),
            classes,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Code of `value`, if it was seen during fitting
    pub fn encode(&self, value: &str) -> Result<usize, PipelineError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .map_err(|_| PipelineError::UnknownCategory {
                field: self.column.clone(),
                value: value.to_string(),
            })
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err(format!("encoder for {} has no classes", self.column));
        }
        if self.classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!(
                "classes of {} must be strictly ascending",
                self.column
            ));
        }
        Ok(())
    }
}

impl FittedTransformer for LabelEncoder {
    fn declared_fields(&self) -> &[String] {
        std::slice::from_ref(&self.column)
    }

    fn transform(&self, cells: &[Cell]) -> Result<Vec<Cell>, PipelineError> {
        if cells.len() != 1 {
            return Err(PipelineError::ShapeMismatch {
                expected: 1,
                found: cells.len(),
            });
        }
        let value = cells[0]
            .as_text()
            .ok_or_else(|| PipelineError::NonCategoricalValue {
                field: self.column.clone(),
            })?;
        let code = self.encode(value)?;
        Ok(vec![Cell::Number(code as f64)])
    }
}

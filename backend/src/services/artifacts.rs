//! Loading fitted artifacts from the artifact directory

use std::fs;
use std::path::{Path, PathBuf};
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use shared::classifier::ClassifierArtifact;
use shared::pipeline::{names, ArtifactBundle, PredictionContext};
use shared::preprocessing::TransformerArtifact;
use shared::{columns, ArtifactError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactLoadError {
    #[error("Failed to read artifact {name} from {path}: {source}")]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ArtifactError),
}

/// Reads the fixed set of artifact documents from one directory
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and validate every artifact, in pipeline order
    pub fn load(&self) -> Result<PredictionContext, ArtifactLoadError> {
        let mut label_encoders = BTreeMap::new();
        for column in columns::CATEGORICAL {
            let encoder: TransformerArtifact = self.read(&names::label_encoder(column))?;
            label_encoders.insert(column.to_string(), encoder);
        }

        let bundle = ArtifactBundle {
            numeric_imputer: self.read(names::NUMERIC_IMPUTER)?,
            categorical_imputer: self.read(names::CATEGORICAL_IMPUTER)?,
            label_encoders,
            scaler_std: self.read(names::SCALER_STD)?,
            scaler_mm: self.read(names::SCALER_MM)?,
            power_transformer: self.read(names::POWER_TRANSFORMER)?,
            classifier: self.read::<ClassifierArtifact>(names::CLASSIFIER)?,
        };

        let context = PredictionContext::from_bundle(bundle)?;
        tracing::info!(
            "Loaded {} artifacts from {}",
            context.artifact_count(),
            self.dir.display()
        );
        Ok(context)
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, ArtifactLoadError> {
        let path = self.dir.join(format!("{}.json", name));
        tracing::debug!("Reading artifact {} from {}", name, path.display());
        let text = fs::read_to_string(&path).map_err(|source| ArtifactLoadError::Io {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ArtifactLoadError::Parse {
            name: name.to_string(),
            source,
        })
    }
}

//! Services for the rain dashboard

pub mod analysis;
pub mod artifacts;
pub mod dataset;
pub mod prediction;

pub use analysis::AnalysisService;
pub use artifacts::{ArtifactLoadError, ArtifactStore};
pub use prediction::PredictionService;

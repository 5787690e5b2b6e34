//! Shared domain library for the Weather AUS rain dashboard
//!
//! Holds everything that does not touch the network or the filesystem: the
//! fitted preprocessing transformers and classifier, the prediction context
//! that chains them, the historical analysis filter with its chart datasets,
//! and input validation. The backend and the WASM bindings both build on it.

pub mod analysis;
pub mod classifier;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod types;
pub mod validation;

pub use error::{ArtifactError, PipelineError};
pub use models::*;
pub use pipeline::{ArtifactBundle, PredictionContext, PredictionOutcome};
pub use types::*;
pub use validation::*;

//! Risk Model Inference
//!
//! Narrow boundary around the pre-trained heart and diabetes classifiers.
//! Every model carries the schema it was trained on, so a mismatched row is
//! rejected before the model is called.

mod artifact;
mod model;
mod registry;

pub use artifact::{LogisticArtifact, LogisticModel};
pub use model::{predict, Outcome, RiskModel};
pub use registry::{ModelPaths, ModelSet};

use risk_features::SchemaMismatch;
use thiserror::Error;

/// Errors at the model boundary
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
    #[error("Model returned non-binary output: {0}")]
    NonBinaryOutput(f64),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

//! Logistic Regression Model Artifacts
//!
//! Artifacts are JSON files naming the columns they were trained on. The
//! column list is verified against the kind's schema at load time.

use crate::model::RiskModel;
use crate::PredictionError;
use risk_features::{FeatureSchema, ModelKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_HEART: &str = include_str!("../models/heart.json");
const BUILTIN_DIABETES: &str = include_str!("../models/diabetes.json");

fn default_threshold() -> f64 {
    0.5
}

/// Serialized form of a logistic model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticArtifact {
    pub kind: ModelKind,
    pub columns: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Probability at or above which the label is 1
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Loaded logistic regression classifier
#[derive(Debug, Clone)]
pub struct LogisticModel {
    schema: &'static FeatureSchema,
    coefficients: Vec<f64>,
    intercept: f64,
    threshold: f64,
    source: String,
}

impl LogisticModel {
    /// Build a model from an artifact, verifying it against the schema
    pub fn from_artifact(artifact: LogisticArtifact, source: &str) -> Result<Self, PredictionError> {
        let schema = artifact.kind.schema();

        if !schema.matches(artifact.columns.as_slice()) {
            return Err(PredictionError::ModelLoad(format!(
                "{}: columns {:?} do not match {} schema {:?}",
                source, artifact.columns, artifact.kind, schema.columns
            )));
        }
        if artifact.coefficients.len() != schema.width() {
            return Err(PredictionError::ModelLoad(format!(
                "{}: expected {} coefficients, found {}",
                source,
                schema.width(),
                artifact.coefficients.len()
            )));
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PredictionError::ModelLoad(format!(
                "{}: non-finite weight",
                source
            )));
        }
        if !(artifact.threshold > 0.0 && artifact.threshold < 1.0) {
            return Err(PredictionError::ModelLoad(format!(
                "{}: threshold {} outside (0, 1)",
                source, artifact.threshold
            )));
        }

        info!("Loaded {} model from {}", artifact.kind, source);
        Ok(Self {
            schema,
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            threshold: artifact.threshold,
            source: source.to_string(),
        })
    }

    /// Parse an artifact from JSON text
    pub fn from_json(json: &str, source: &str) -> Result<Self, PredictionError> {
        let artifact: LogisticArtifact = serde_json::from_str(json)
            .map_err(|e| PredictionError::ModelLoad(format!("{}: {}", source, e)))?;
        Self::from_artifact(artifact, source)
    }

    /// Load an artifact file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PredictionError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PredictionError::ModelLoad(format!("{}: {}", source, e)))?;
        Self::from_json(&json, &source)
    }

    /// Model shipped with the crate
    pub fn builtin(kind: ModelKind) -> Result<Self, PredictionError> {
        match kind {
            ModelKind::Heart => Self::from_json(BUILTIN_HEART, "builtin:heart"),
            ModelKind::Diabetes => Self::from_json(BUILTIN_DIABETES, "builtin:diabetes"),
        }
    }

    /// Positive-class probability for a row
    pub fn probability(&self, row: &[f64]) -> f64 {
        let z: f64 = self
            .coefficients
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }

    /// Where the model was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl RiskModel for LogisticModel {
    fn schema(&self) -> &'static FeatureSchema {
        self.schema
    }

    fn infer(&self, row: &[f64]) -> Result<f64, PredictionError> {
        if row.len() != self.coefficients.len() {
            return Err(PredictionError::InferenceFailed(format!(
                "row has {} values, model has {} weights",
                row.len(),
                self.coefficients.len()
            )));
        }

        let p = self.probability(row);
        if !p.is_finite() {
            return Err(PredictionError::InferenceFailed(
                "probability is not finite".to_string(),
            ));
        }
        debug!("{} probability {:.4}", self.schema.kind, p);

        Ok(if p >= self.threshold { 1.0 } else { 0.0 })
    }
}

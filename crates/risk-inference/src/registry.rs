//! Loaded Model Set

use crate::artifact::LogisticModel;
use crate::model::{predict, Outcome, RiskModel};
use crate::PredictionError;
use risk_features::{FeatureVector, ModelKind, SchemaMismatch};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Artifact locations; `None` selects the built-in model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelPaths {
    pub heart: Option<PathBuf>,
    pub diabetes: Option<PathBuf>,
}

/// One model per kind, loaded once and shared read-only
#[derive(Clone)]
pub struct ModelSet {
    heart: Arc<dyn RiskModel>,
    diabetes: Arc<dyn RiskModel>,
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet")
            .field("heart", &self.heart.schema().kind)
            .field("diabetes", &self.diabetes.schema().kind)
            .finish()
    }
}

fn expect_kind(model: &dyn RiskModel, kind: ModelKind) -> Result<(), PredictionError> {
    let actual = model.schema().kind;
    if actual != kind {
        return Err(SchemaMismatch::KindMismatch {
            expected: kind,
            actual,
        }
        .into());
    }
    Ok(())
}

impl ModelSet {
    /// Pair two models, checking each sits in the right slot
    pub fn new(
        heart: Arc<dyn RiskModel>,
        diabetes: Arc<dyn RiskModel>,
    ) -> Result<Self, PredictionError> {
        expect_kind(heart.as_ref(), ModelKind::Heart)?;
        expect_kind(diabetes.as_ref(), ModelKind::Diabetes)?;
        Ok(Self { heart, diabetes })
    }

    /// Load artifacts from disk, falling back to the built-in models
    pub fn load(paths: &ModelPaths) -> Result<Self, PredictionError> {
        let heart = Self::load_one(ModelKind::Heart, paths.heart.as_ref())?;
        let diabetes = Self::load_one(ModelKind::Diabetes, paths.diabetes.as_ref())?;
        info!(
            "Model set ready: heart={}, diabetes={}",
            heart.source(),
            diabetes.source()
        );
        Self::new(Arc::new(heart), Arc::new(diabetes))
    }

    /// Built-in models for both kinds
    pub fn builtin() -> Result<Self, PredictionError> {
        Self::load(&ModelPaths::default())
    }

    fn load_one(kind: ModelKind, path: Option<&PathBuf>) -> Result<LogisticModel, PredictionError> {
        let model = match path {
            Some(path) => LogisticModel::from_path(path)?,
            None => {
                warn!("No {} model path configured. Using built-in model.", kind);
                LogisticModel::builtin(kind)?
            }
        };
        expect_kind(&model, kind)?;
        Ok(model)
    }

    /// Model for a kind
    pub fn get(&self, kind: ModelKind) -> &dyn RiskModel {
        match kind {
            ModelKind::Heart => self.heart.as_ref(),
            ModelKind::Diabetes => self.diabetes.as_ref(),
        }
    }

    /// Route a vector to the model of its kind
    pub fn predict(&self, vector: &FeatureVector) -> Result<Outcome, PredictionError> {
        predict(self.get(vector.kind()), vector)
    }
}

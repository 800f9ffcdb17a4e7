//! Interactive session: encode, predict, label, log

use chrono::{DateTime, Utc};
use prediction_log::{PredictionEvent, PredictionLog};
use risk_features::{ClinicalInput, Encoder, FeatureVector, FieldMap, ModelKind, SchemaMismatch};
use risk_inference::{ModelSet, Outcome, PredictionError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors from a single submission. The log is untouched when one occurs.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// Result of one submission
#[derive(Debug, Clone)]
pub struct Assessment {
    pub outcome: Outcome,
    pub event: PredictionEvent,
}

/// One user session. Owns the prediction log; models are shared.
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    models: Arc<ModelSet>,
    encoder: Encoder,
    log: PredictionLog,
}

impl Session {
    /// Start a session with an empty log
    pub fn new(models: Arc<ModelSet>, encoder: Encoder) -> Self {
        let id = Uuid::new_v4();
        info!("Session {} started", id);
        Self {
            id,
            started_at: Utc::now(),
            models,
            encoder,
            log: PredictionLog::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Read access to the prediction log
    pub fn log(&self) -> &PredictionLog {
        &self.log
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Encode named fields, run the model and log the result
    pub fn submit(&mut self, kind: ModelKind, fields: &FieldMap) -> Result<Assessment, SessionError> {
        let vector = self.encoder.encode(kind, fields).map_err(|e| {
            warn!("Session {}: rejected {} input: {}", self.id, kind, e);
            e
        })?;
        self.assess(vector)
    }

    /// Same as `submit` for typed input
    pub fn submit_input(&mut self, input: &ClinicalInput) -> Result<Assessment, SessionError> {
        let vector = self.encoder.encode_input(input)?;
        self.assess(vector)
    }

    fn assess(&mut self, vector: FeatureVector) -> Result<Assessment, SessionError> {
        let kind = vector.kind();
        let outcome = self.models.predict(&vector).map_err(|e| {
            warn!("Session {}: {} prediction failed: {}", self.id, kind, e);
            e
        })?;

        let event = PredictionEvent::new(kind, outcome.label(kind));
        self.log.append(event.clone());
        info!(
            "Session {}: {} prediction -> {} ({} logged)",
            self.id,
            kind,
            event.result(),
            self.log.len()
        );

        Ok(Assessment { outcome, event })
    }

    /// End this session, discarding its log, and start a fresh one.
    /// Returns the number of discarded entries.
    pub fn restart(&mut self) -> usize {
        let discarded = self.log.len();
        info!("Session {} ended after {} predictions", self.id, discarded);

        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.log = PredictionLog::new();
        info!("Session {} started", self.id);
        discarded
    }

    /// End the session, returning its final log
    pub fn end(self) -> PredictionLog {
        info!("Session {} ended after {} predictions", self.id, self.log.len());
        self.log
    }
}

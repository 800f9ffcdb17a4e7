//! Prediction Events

use chrono::{DateTime, SecondsFormat, Utc};
use risk_features::ModelKind;
use serde::{Deserialize, Serialize};

/// One completed prediction. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionEvent {
    #[serde(rename = "type")]
    kind: ModelKind,
    result: String,
    time: DateTime<Utc>,
}

impl PredictionEvent {
    /// Create an event stamped with the current time
    pub fn new(kind: ModelKind, result: impl Into<String>) -> Self {
        Self::at(kind, result, Utc::now())
    }

    /// Create an event with an explicit timestamp
    pub fn at(kind: ModelKind, result: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            kind,
            result: result.into(),
            time,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Risk label shown to the user
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// ISO-8601 timestamp, lossless to the nanosecond
    pub fn time_iso(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

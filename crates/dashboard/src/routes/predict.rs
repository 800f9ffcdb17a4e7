//! Prediction Submission Route

use axum::{
    extract::{Path, State},
    Json,
};
use risk_features::{FieldMap, ModelKind};
use serde::Serialize;

use crate::{ApiError, SharedState};

/// Response for a submitted prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    /// Raw model label (0 or 1)
    pub label: u8,
    /// Risk label shown to the user
    pub result: String,
    pub time: String,
}

/// Encode the posted fields, run the model and log the outcome
pub async fn submit(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
    Json(fields): Json<FieldMap>,
) -> Result<Json<PredictResponse>, ApiError> {
    let kind: ModelKind = kind.parse()?;

    let mut state = state.write().await;
    let assessment = state.session.submit(kind, &fields)?;

    Ok(Json(PredictResponse {
        kind,
        label: assessment.outcome.code(),
        result: assessment.event.result().to_string(),
        time: assessment.event.time_iso(),
    }))
}

//! Input Schema Route

use axum::{
    extract::{Path, State},
    Json,
};
use risk_features::{FieldSpec, InputRanges, ModelKind};
use serde::Serialize;

use crate::{ApiError, SharedState};

/// Form fields and model columns for one kind
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub fields: &'static [FieldSpec],
    pub columns: &'static [&'static str],
    pub ranges: InputRanges,
}

/// Describe the inputs a kind accepts
pub async fn get_schema(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
) -> Result<Json<SchemaResponse>, ApiError> {
    let kind: ModelKind = kind.parse()?;
    let state = state.read().await;

    Ok(Json(SchemaResponse {
        kind,
        fields: kind.input_fields(),
        columns: kind.schema().columns,
        ranges: state.session.encoder().ranges().clone(),
    }))
}

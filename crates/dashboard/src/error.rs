//! API error responses

use crate::session::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use risk_features::{SchemaMismatch, UnknownKind};
use risk_inference::PredictionError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Schema(e) => ApiError::Schema(e),
            SessionError::Prediction(e) => ApiError::Prediction(e),
        }
    }
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownKind(_) => StatusCode::BAD_REQUEST,
            ApiError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_features::ModelKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(UnknownKind("Kidney".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(SessionError::Schema(SchemaMismatch::MissingField {
                kind: ModelKind::Heart,
                field: "age",
            }))
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(SessionError::Prediction(PredictionError::NonBinaryOutput(0.5))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! Prediction Log Routes

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use prediction_log::{
    export_csv, risk_distribution, summarize, KindFilter, LogStats, PredictionEvent, ResultShare,
    SummaryGrid, SummaryRow,
};
use serde::{Deserialize, Serialize};

use crate::{ApiError, SharedState};

/// Query parameters for log views
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    /// All, Heart or Diabetes
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl LogQuery {
    fn filter(&self) -> Result<KindFilter, ApiError> {
        match self.kind.as_deref() {
            Some(kind) => Ok(kind.parse()?),
            None => Ok(KindFilter::All),
        }
    }
}

/// Response for the log listing
#[derive(Debug, Serialize)]
pub struct PredictionListResponse {
    pub filter: String,
    pub data: Vec<PredictionEvent>,
    pub count: usize,
}

/// Response for the chart summary
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub filter: String,
    pub rows: Vec<SummaryRow>,
    pub grid: SummaryGrid,
    pub distribution: Vec<ResultShare>,
}

/// List logged predictions
pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<LogQuery>,
) -> Result<Json<PredictionListResponse>, ApiError> {
    let filter = params.filter()?;
    let state = state.read().await;

    let data: Vec<PredictionEvent> = state
        .session
        .log()
        .filter(filter.kind())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(PredictionListResponse {
        filter: filter.to_string(),
        count: data.len(),
        data,
    }))
}

/// KPI counts
pub async fn stats(State(state): State<SharedState>) -> Json<LogStats> {
    let state = state.read().await;
    Json(state.session.log().stats())
}

/// Cross-tabulated counts for charts
pub async fn summary(
    State(state): State<SharedState>,
    Query(params): Query<LogQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let filter = params.filter()?;
    let state = state.read().await;
    let entries = state.session.log().filter(filter.kind());

    let summary = summarize(entries.iter().copied());
    Ok(Json(SummaryResponse {
        filter: filter.to_string(),
        rows: summary.rows(),
        grid: summary.grid(),
        distribution: risk_distribution(entries.iter().copied()),
    }))
}

/// Download the log as CSV
pub async fn export(
    State(state): State<SharedState>,
    Query(params): Query<LogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = params.filter()?;
    let state = state.read().await;
    let csv = export_csv(state.session.log().filter(filter.kind()));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"predictions.csv\"",
            ),
        ],
        csv,
    ))
}

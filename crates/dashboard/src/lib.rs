//! Health Risk Dashboard API Server
//!
//! REST API over a single interactive session: submit clinical inputs for
//! heart or diabetes risk, then browse, chart and export the session log.

use anyhow::Context;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use risk_features::Encoder;
use risk_inference::ModelSet;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

mod config;
mod error;
mod routes;
mod session;

pub use config::{DashboardConfig, DEFAULT_CONFIG_FILE};
pub use error::ApiError;
pub use session::{Assessment, Session, SessionError};

/// Application state shared across handlers
pub struct AppState {
    /// The active session
    pub session: Session,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub session: Uuid,
    pub prediction_count: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/schema/:kind", get(routes::schema::get_schema))
        .route("/api/v1/predict/:kind", post(routes::predict::submit))
        .route("/api/v1/predictions", get(routes::predictions::list))
        .route("/api/v1/predictions/stats", get(routes::predictions::stats))
        .route("/api/v1/predictions/summary", get(routes::predictions::summary))
        .route("/api/v1/predictions/export", get(routes::predictions::export))
        .route("/api/v1/session/end", post(routes::session::end_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        session: state.session.id(),
        prediction_count: state.session.log().len(),
    })
}

/// Initialize logging
pub fn init_logging(
    config: &DashboardConfig,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(config.level())
        .with_target(true);

    if config.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Build the shared state: load models and open the first session
pub fn build_state(config: &DashboardConfig) -> anyhow::Result<SharedState> {
    let models = ModelSet::load(&config.models).context("Failed to load risk models")?;
    let session = Session::new(Arc::new(models), Encoder::new(config.ranges.clone()));
    Ok(Arc::new(RwLock::new(AppState::new(session))))
}

/// Run the server
pub async fn run_server(config: &DashboardConfig) -> anyhow::Result<()> {
    let state = build_state(config)?;
    let app = create_router(state);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Session Routes

use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::SharedState;

/// Response for ending a session
#[derive(Debug, Serialize)]
pub struct EndSessionResponse {
    pub ended: Uuid,
    pub session: Uuid,
    pub discarded: usize,
}

/// End the current session, discarding its log
pub async fn end_session(State(state): State<SharedState>) -> Json<EndSessionResponse> {
    let mut state = state.write().await;
    let ended = state.session.id();
    let discarded = state.session.restart();

    Json(EndSessionResponse {
        ended,
        session: state.session.id(),
        discarded,
    })
}

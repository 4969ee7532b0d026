//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

fn busy() -> Response {
    tracing::warn!("Rejected chat message, a turn is already in flight");
    (StatusCode::CONFLICT, Json(public::ChatBusyResponse::new())).into_response()
}

/// Add a message to the conversation and wait for the reply
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Response {
    let Some(mut session) = state.try_begin_turn().await else {
        return busy();
    };

    let outcome = session.submit_turn(&payload.message).await;

    Json(public::ChatResponse {
        display: outcome.display,
        error: outcome.error,
        transcript_len: session.len(),
    })
    .into_response()
}

/// Get the full transcript, waiting for any turn in flight to settle
async fn chat_transcript(State(state): State<SharedState>) -> Json<public::ChatTranscriptResponse> {
    let session = state.session.lock().await;
    Json(public::ChatTranscriptResponse {
        transcript: session.messages().to_vec(),
    })
}

/// Start the conversation over
async fn chat_reset(State(state): State<SharedState>) -> Response {
    let Some(mut session) = state.try_begin_turn().await else {
        return busy();
    };
    session.clear();
    tracing::info!("Chat transcript reset");

    StatusCode::NO_CONTENT.into_response()
}

async fn chat_status(State(state): State<SharedState>) -> Json<public::ChatStatusResponse> {
    Json(public::ChatStatusResponse {
        state: state.turn_state(),
    })
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/transcript", get(chat_transcript).delete(chat_reset))
        .route("/status", get(chat_status))
}

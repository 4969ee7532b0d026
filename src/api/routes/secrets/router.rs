//! Router for the local secrets endpoint.
//!
//! Serves the completion API key as raw text so clients can fetch it
//! right before each request. Only meant to be reachable locally.

use std::sync::Arc;

use axum::{Router, extract::State, routing::get};

use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn api_key(State(state): State<SharedState>) -> String {
    tracing::debug!("Serving API key");
    state.config.openai_api_key.clone()
}

/// Create the secrets router
pub fn router() -> Router<SharedState> {
    Router::new().route("/apiKey", get(api_key))
}

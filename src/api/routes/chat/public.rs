//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::ai::chat::{TurnErrorKind, TurnState};
use crate::openai::Message;

pub const BUSY_MESSAGE: &str =
    "Still working on your last message. Please wait for it to finish.";

#[derive(Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    /// The reply, or a fallback explaining why there isn't one
    pub display: String,
    pub error: Option<TurnErrorKind>,
    pub transcript_len: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ChatBusyResponse {
    pub message: String,
}

impl ChatBusyResponse {
    pub fn new() -> Self {
        Self {
            message: BUSY_MESSAGE.into(),
        }
    }
}

impl Default for ChatBusyResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
pub struct ChatTranscriptResponse {
    pub transcript: Vec<Message>,
}

#[derive(Serialize)]
pub struct ChatStatusResponse {
    pub state: TurnState,
}

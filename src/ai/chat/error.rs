use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown while a turn is waiting on the completion endpoint.
pub const LOADING_MESSAGE: &str = "I'M THINKING HOLD ON";

pub const CONNECTION_FALLBACK: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";
pub const INVALID_RESPONSE_FALLBACK: &str =
    "Sorry, I received an invalid response. Please try again.";
pub const UNEXPECTED_RESPONSE_FALLBACK: &str =
    "Sorry, I got an unexpected response. Please try asking again.";

/// Why a chat turn didn't produce a reply. None of these are fatal to
/// the session, the next turn starts from a clean slate.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// The credential or completion request never produced a 2xx body
    #[error("completion request failed: {0:#}")]
    Connection(anyhow::Error),
    #[error("response body is not valid JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("response is missing choices[0].message.content: {0}")]
    UnexpectedResponse(String),
}

impl TurnError {
    pub fn kind(&self) -> TurnErrorKind {
        match self {
            TurnError::Connection(_) => TurnErrorKind::Connection,
            TurnError::InvalidResponse(_) => TurnErrorKind::InvalidResponse,
            TurnError::UnexpectedResponse(_) => TurnErrorKind::UnexpectedResponse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnErrorKind {
    Connection,
    InvalidResponse,
    UnexpectedResponse,
}

impl TurnErrorKind {
    /// The fixed text shown to the user in place of a reply.
    pub fn fallback(&self) -> &'static str {
        match self {
            TurnErrorKind::Connection => CONNECTION_FALLBACK,
            TurnErrorKind::InvalidResponse => INVALID_RESPONSE_FALLBACK,
            TurnErrorKind::UnexpectedResponse => UNEXPECTED_RESPONSE_FALLBACK,
        }
    }
}

impl fmt::Display for TurnErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TurnErrorKind::Connection => "connection",
            TurnErrorKind::InvalidResponse => "invalid_response",
            TurnErrorKind::UnexpectedResponse => "unexpected_response",
        };
        f.write_str(s)
    }
}

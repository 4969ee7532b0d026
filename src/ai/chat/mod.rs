mod core;
pub mod error;
mod models;

pub use self::core::{Chat, ChatBuilder, TurnOutcome, parse_reply};
pub use error::{TurnError, TurnErrorKind, LOADING_MESSAGE};
pub use models::{Transcript, TurnState};

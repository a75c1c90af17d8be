//! Chat surface of the game.
//!
//! Platform adapters translate their events into [`ChatEvent`] and deliver
//! whatever [`Outbound`] payloads the [`GameHandler`] returns. Connection and
//! delivery stay with the adapter.

pub mod handler;

use serde::{Deserialize, Serialize};

pub use handler::GameHandler;

/// Rich message accent for a solved round.
pub const COLOR_SOLVED: u32 = 0x00FF00;
/// Rich message accent for an ordinary guess.
pub const COLOR_GUESS: u32 = 0xFFFFFF;

/// An inbound text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Room (guild/channel) the game state is keyed by.
    pub room_id: String,
    pub author_id: String,
    pub is_bot: bool,
    pub text: String,
}

impl ChatEvent {
    pub fn new(room_id: &str, author_id: &str, text: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            author_id: author_id.to_string(),
            is_bot: false,
            text: text.to_string(),
        }
    }
}

/// An embed-style message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichMessage {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub thumbnail_url: Option<String>,
}

/// A reply for the adapter to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Outbound {
    Text(String),
    Rich(RichMessage),
}

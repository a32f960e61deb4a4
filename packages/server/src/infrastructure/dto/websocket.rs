//! WebSocket frame DTOs.
//!
//! Every frame is one JSON object tagged by its `type` field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors decoding an inbound frame. Any of them ends the session.
#[derive(Debug, Error)]
pub enum InboundError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("frame is not an object with a string `type`")]
    MissingType,

    #[error("binary frames are not supported")]
    BinaryFrame,
}

/// Frames sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        username: Option<String>,
    },
    Message {
        text: String,
    },
    Typing,
    /// Any other `type`; accepted and ignored.
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Decode one text frame.
    ///
    /// The `type` check runs first so that a non-string tag is rejected
    /// instead of falling through to [`ClientMessage::Unknown`].
    pub fn from_json(raw: &str) -> Result<Self, InboundError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.get("type").is_some_and(serde_json::Value::is_string) {
            return Err(InboundError::MissingType);
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Frames sent by the server.
///
/// `history` entries use the same `system` / `message` shapes as live frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    Init {
        history: Vec<ServerMessage>,
        #[serde(rename = "userCount")]
        user_count: usize,
        color: String,
    },
    System {
        text: String,
        timestamp: String,
        #[serde(rename = "userCount")]
        user_count: usize,
    },
    Message {
        username: String,
        text: String,
        color: String,
        timestamp: String,
    },
    Typing {
        username: String,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

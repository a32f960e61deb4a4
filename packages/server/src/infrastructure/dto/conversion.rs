//! Conversion logic between DTOs and domain entities.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatEvent, OutboundEvent, SessionCommand};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientMessage> for SessionCommand {
    fn from(msg: dto::ClientMessage) -> Self {
        match msg {
            dto::ClientMessage::Join { username } => SessionCommand::Join { username },
            dto::ClientMessage::Message { text } => SessionCommand::Message { text },
            dto::ClientMessage::Typing => SessionCommand::Typing,
            dto::ClientMessage::Unknown => SessionCommand::Unknown,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatEvent> for dto::ServerMessage {
    fn from(event: &ChatEvent) -> Self {
        match event {
            ChatEvent::System(notice) => Self::System {
                text: notice.text.clone(),
                timestamp: timestamp_to_rfc3339(notice.timestamp.value()),
                user_count: notice.user_count,
            },
            ChatEvent::Chat(line) => Self::Message {
                username: line.username.as_str().to_string(),
                text: line.text.as_str().to_string(),
                color: line.color.as_str().to_string(),
                timestamp: timestamp_to_rfc3339(line.timestamp.value()),
            },
        }
    }
}

impl From<OutboundEvent> for dto::ServerMessage {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::Init {
                history,
                user_count,
                color,
            } => Self::Init {
                history: history.iter().map(Self::from).collect(),
                user_count,
                color: color.as_str().to_string(),
            },
            OutboundEvent::Event(event) => Self::from(&event),
            OutboundEvent::Typing { username } => Self::Typing {
                username: username.into_string(),
            },
        }
    }
}

//! Per-connection protocol state machine.
//!
//! `Connected` (no name yet) → `Joined` (named) → `Closed` (terminal).
//! The state machine is pure: it decides what a command means for this
//! session and leaves the side effects to the use case layer.

use super::value_object::{Color, MessageText, SessionId, Username};

/// Commands a client can send over its connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Join { username: Option<String> },
    Message { text: String },
    Typing,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Joined(Username),
    Closed,
}

/// Why a command produced no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotJoined,
    EmptyMessage,
    UnknownType,
    Closed,
}

/// What the session decided to do with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Join(Username),
    Chat { username: Username, text: MessageText },
    Typing(Username),
    Ignore(IgnoreReason),
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    color: Color,
    state: SessionState,
}

impl Session {
    pub fn new(id: SessionId, color: Color) -> Self {
        Self {
            id,
            color,
            state: SessionState::Connected,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn username(&self) -> Option<&Username> {
        match &self.state {
            SessionState::Joined(username) => Some(username),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    /// Apply an inbound command.
    ///
    /// A repeated `join` re-derives the username.
    pub fn handle(&mut self, command: SessionCommand) -> SessionAction {
        if self.is_closed() {
            return SessionAction::Ignore(IgnoreReason::Closed);
        }

        match command {
            SessionCommand::Join { username } => {
                let username = username
                    .as_deref()
                    .map(Username::new)
                    .unwrap_or_default();
                self.state = SessionState::Joined(username.clone());
                SessionAction::Join(username)
            }
            SessionCommand::Message { text } => {
                let Some(username) = self.username() else {
                    return SessionAction::Ignore(IgnoreReason::NotJoined);
                };
                match MessageText::new(&text) {
                    Ok(text) => SessionAction::Chat {
                        username: username.clone(),
                        text,
                    },
                    Err(_) => SessionAction::Ignore(IgnoreReason::EmptyMessage),
                }
            }
            SessionCommand::Typing => match self.username() {
                Some(username) => SessionAction::Typing(username.clone()),
                None => SessionAction::Ignore(IgnoreReason::NotJoined),
            },
            SessionCommand::Unknown => SessionAction::Ignore(IgnoreReason::UnknownType),
        }
    }

    /// Move to `Closed`, returning the previous state.
    ///
    /// Returns `None` when the session was already closed, so the caller
    /// runs its cleanup exactly once.
    pub fn close(&mut self) -> Option<SessionState> {
        if self.is_closed() {
            return None;
        }
        Some(std::mem::replace(&mut self.state, SessionState::Closed))
    }
}

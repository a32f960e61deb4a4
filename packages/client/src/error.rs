//! Error types for the CLI client.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not connect, or a frame could not be written
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Outgoing frame could not be encoded
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// The server closed an established connection
    #[error("Connection lost")]
    ConnectionLost,

    /// Gave up after the configured number of reconnect attempts
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}

impl ClientError {
    /// Whether the connection had been established before the error occurred
    pub fn was_connected(&self) -> bool {
        matches!(self, ClientError::ConnectionLost)
    }
}

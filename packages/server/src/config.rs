//! Server configuration.

use crate::domain::{DEFAULT_HISTORY_CAPACITY, DEFAULT_REPLAY_LIMIT};

/// Runtime settings for [`Server`](crate::ui::Server).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,
    /// Port number to bind to
    pub port: u16,
    /// Number of broadcast events kept in memory
    pub history_capacity: usize,
    /// Number of recent events replayed to a joining client
    pub replay_limit: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            replay_limit: DEFAULT_REPLAY_LIMIT,
        }
    }
}

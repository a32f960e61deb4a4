//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Liveness probe response: `{"status":"ok","clients":N}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub clients: usize,
}

impl HealthDto {
    pub fn ok(clients: usize) -> Self {
        Self {
            status: "ok".to_string(),
            clients,
        }
    }
}

//! Hiroba broadcast chat server.
//!
//! Accepts WebSocket clients on `/ws`, replays recent history on join and
//! broadcasts every chat message and presence change to all joined clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 127.0.0.1 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    config::ServerConfig,
    domain::{DEFAULT_HISTORY_CAPACITY, DEFAULT_REPLAY_LIMIT},
    ui::{Server, state::AppState},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Broadcast chat server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Number of broadcast events kept in memory
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Number of recent events replayed to a joining client
    #[arg(long, default_value_t = DEFAULT_REPLAY_LIMIT)]
    replay_limit: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            history_capacity: args.history_capacity,
            replay_limit: args.replay_limit,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());
    tracing::debug!("Starting with {:?}", config);

    // 1. Wire registry, hub and use cases
    let state = Arc::new(AppState::from_config(&config));

    // 2. Create and run the server
    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

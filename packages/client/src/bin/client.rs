//! Line-oriented chat client for the Hiroba broadcast server.
//!
//! Joins with the given username, prints every frame the server pushes and
//! sends each entered line as a chat message.
//! Automatically reconnects on disconnection (max 5 attempts with 2 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username Alice
//! cargo run --bin hiroba-client -- -n Bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use hiroba_client::{ReconnectPolicy, run_client};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "CLI chat client for the Hiroba broadcast server", long_about = None)]
struct Args {
    /// Display name (trimmed and clamped to 20 characters by the server)
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.username, ReconnectPolicy::default()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

//! HTTP / WebSocket surface of the broadcast hub.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;

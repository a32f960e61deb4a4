//! Line-oriented CLI client for the Hiroba broadcast chat server.

pub mod error;
pub mod formatter;
pub mod runner;
mod session;
mod ui;

pub use runner::{ReconnectPolicy, run_client};

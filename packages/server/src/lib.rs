//! Hiroba broadcast chat hub library.
//!
//! Clients attach over a WebSocket, announce a display name and exchange short
//! text messages that are fanned out to every attached client. A bounded
//! history is replayed to newly joining clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

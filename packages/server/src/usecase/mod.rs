//! UseCase layer: orchestrates the domain through the BroadcastHub.

mod broadcast;
mod connect_session;
mod disconnect_session;
mod get_health;
mod handle_command;

pub use broadcast::BroadcastHub;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::{DisconnectOutcome, DisconnectSessionUseCase};
pub use get_health::GetHealthUseCase;
pub use handle_command::{CommandOutcome, HandleCommandUseCase};

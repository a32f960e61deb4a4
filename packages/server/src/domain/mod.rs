//! Domain layer: entities, value objects and the ports the use cases rely on.

pub mod color;
pub mod entity;
pub mod error;
pub mod history;
pub mod registry;
pub mod session;
pub mod value_object;

pub use color::{ColorAssigner, PALETTE};
pub use entity::{Broadcast, ChatEvent, ChatLine, OutboundEvent, SystemNotice};
pub use error::MessageTextError;
pub use history::{DEFAULT_HISTORY_CAPACITY, DEFAULT_REPLAY_LIMIT, HistoryBuffer};
pub use registry::{ConnectionRegistry, PusherChannel, RegisteredSession};
#[cfg(test)]
pub use registry::MockConnectionRegistry;
pub use session::{IgnoreReason, Session, SessionAction, SessionCommand, SessionState};
pub use value_object::{Color, MessageText, SessionId, Timestamp, Username};

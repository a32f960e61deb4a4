//! Domain errors.

use thiserror::Error;

/// Errors raised while building a [`MessageText`](super::MessageText).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageTextError {
    /// Nothing left after trimming surrounding whitespace
    #[error("message text is empty")]
    Empty,
}

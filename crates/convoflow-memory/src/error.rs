//! Error types for the conversation store.

use convoflow_models::ValidationError;
use thiserror::Error;

/// Conversation store error types
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Construction rejected: the requested window capacity is below the
    /// policy floor ([`crate::config::MIN_CAPACITY`]).
    #[error("window capacity must be at least 3, got {requested}")]
    Capacity { requested: usize },

    /// A `put` message failed classification; no state was mutated.
    #[error("message rejected: {0}")]
    Validation(#[from] ValidationError),

    /// `remove` was called with a zero count; no state was mutated.
    #[error("remove count must be positive")]
    InvalidCount,
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, MemoryError>;

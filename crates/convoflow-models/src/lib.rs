//! ConvoFlow Models - Shared chat message primitives
//!
//! This crate provides:
//! - The inbound [`ChatMessage`] value handed over by the orchestration layer
//! - The classified [`StoredMessage`] sum type the store keeps internally
//! - [`ValidationError`] produced when classification fails

pub mod message;

pub use message::{
    ChatMessage, InteractiveMessage, InteractiveRole, StoredMessage, SystemMessage,
    ValidationError,
};

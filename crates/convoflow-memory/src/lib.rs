//! ConvoFlow Memory - Concurrency-safe bounded conversation buffer
//!
//! This crate provides:
//! - [`ConversationStore`]: a per-key window of recent interactive messages
//!   plus one capacity-exempt system message per key
//! - [`StoreConfig`]: construction-time configuration (window capacity)
//! - [`MemoryError`]: typed failures for construction, classification, and
//!   partial removal
//!
//! The store is purely in-memory and synchronous; persistence, token-based
//! trimming, and provider concerns live with its callers.

pub mod config;
pub mod error;
pub mod store;

pub use config::{DEFAULT_CAPACITY, MIN_CAPACITY, StoreConfig};
pub use error::{MemoryError, Result};
pub use store::ConversationStore;

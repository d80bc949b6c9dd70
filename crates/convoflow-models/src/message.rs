//! Chat message types and classification.
//!
//! The orchestration layer hands the store a [`ChatMessage`] with a free-form
//! role string, typically deserialized straight off a provider response. The
//! store resolves that value exactly once, at insert time, into a
//! [`StoredMessage`]: either the per-key system message or an ordinary
//! interactive turn. Unrecognized roles fail classification with a typed
//! [`ValidationError`] instead of being stored as-is.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Role marker carried by a system message.
pub const SYSTEM_ROLE: &str = "system";

/// Inbound chat message as constructed by the orchestration layer.
///
/// The role is a plain string at this boundary; classification into the
/// typed [`StoredMessage`] shape happens when the message enters the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: SYSTEM_ROLE.to_string(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Create a tool/function result message
    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Attach one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Role of an ordinary conversational turn.
///
/// `"function"` is accepted as a wire-level alias of [`InteractiveRole::Tool`]
/// for providers that still emit the legacy role name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractiveRole {
    User,
    Assistant,
    Tool,
}

impl InteractiveRole {
    fn parse(role: &str) -> Option<Self> {
        match role {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "tool" | "function" => Some(Self::Tool),
            _ => None,
        }
    }

    /// Canonical wire name for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

impl fmt::Display for InteractiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single capacity-exempt persona/instruction message kept per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub content: String,
}

/// An ordinary conversational turn retained in a key's window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveMessage {
    pub role: InteractiveRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

/// A classified message, resolved once when it enters the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredMessage {
    System(SystemMessage),
    Interactive(InteractiveMessage),
}

/// Classification failure for a message that fits neither shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unrecognized message role: {0:?}")]
    UnknownRole(String),
}

impl TryFrom<ChatMessage> for StoredMessage {
    type Error = ValidationError;

    fn try_from(message: ChatMessage) -> Result<Self, Self::Error> {
        if message.role == SYSTEM_ROLE {
            return Ok(Self::System(SystemMessage {
                content: message.content,
            }));
        }

        match InteractiveRole::parse(&message.role) {
            Some(role) => Ok(Self::Interactive(InteractiveMessage {
                role,
                content: message.content,
                metadata: message.metadata,
            })),
            None => Err(ValidationError::UnknownRole(message.role)),
        }
    }
}

//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::{MemoryError, Result};

/// Smallest accepted window capacity.
///
/// Policy floor, not an algorithmic constraint: a window needs room for at
/// least one full exchange cycle alongside retained context.
pub const MIN_CAPACITY: usize = 3;

/// Window capacity used when the caller does not specify one.
pub const DEFAULT_CAPACITY: usize = 10;

/// Configuration for a [`crate::ConversationStore`].
///
/// Capacity is fixed for the lifetime of the store; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of interactive messages a key's window may hold.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StoreConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Reject capacities below [`MIN_CAPACITY`].
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_CAPACITY {
            return Err(MemoryError::Capacity {
                requested: self.capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StoreConfig::default().validate().is_ok());
        assert_eq!(StoreConfig::default().capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_capacity_floor() {
        assert!(StoreConfig::new(MIN_CAPACITY).validate().is_ok());

        let err = StoreConfig::new(2).validate().unwrap_err();
        assert!(matches!(err, MemoryError::Capacity { requested: 2 }));
    }

    #[test]
    fn test_missing_capacity_deserializes_to_default() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }
}

//! Per-key bounded conversation buffer.
//!
//! Keeps two partitions per conversation key: an ordered window of recent
//! interactive messages, bounded by a store-wide capacity, and a single
//! system message that sits outside the window and outside count-based
//! removal.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ConversationStore (one Mutex over both partitions)        │
//! │                                                            │
//! │  windows:      key ─▶ [m1, m2, m3, ...]  (≤ capacity)      │
//! │  system_slots: key ─▶ SystemMessage      (0 or 1)          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Decisions
//!
//! - **Advisory capacity**: `put` never rejects or evicts. Callers gate
//!   appends on [`ConversationStore::is_full`]; a window can be pushed past
//!   capacity by a caller that skips the check.
//! - **One critical section**: a single lock guards both maps, so every
//!   operation is atomic with respect to every other operation on the same
//!   store, across all keys.
//! - **Copies across the boundary**: `get` and `system_message` return owned
//!   clones; nothing hands out a reference into store state.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use tracing::{debug, trace};

use convoflow_models::{ChatMessage, InteractiveMessage, StoredMessage, SystemMessage};

use crate::config::{DEFAULT_CAPACITY, StoreConfig};
use crate::error::{MemoryError, Result};

#[derive(Debug, Default)]
struct Partitions {
    windows: HashMap<String, VecDeque<InteractiveMessage>>,
    system_slots: HashMap<String, SystemMessage>,
}

/// Concurrency-safe store of recent conversation turns, partitioned by key.
///
/// All operations take `&self` and serialize through one internal lock, so a
/// store shared as `Arc<ConversationStore>` can be hit from many threads or
/// tasks at once. No operation blocks on anything but that lock.
#[derive(Debug)]
pub struct ConversationStore {
    state: Mutex<Partitions>,
    capacity: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        // DEFAULT_CAPACITY satisfies the floor, so this cannot fail.
        Self {
            state: Mutex::new(Partitions::default()),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ConversationStore {
    /// Create a store with the given window capacity.
    ///
    /// Fails with [`MemoryError::Capacity`] when `capacity` is below
    /// [`crate::config::MIN_CAPACITY`].
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(&StoreConfig::new(capacity))
    }

    /// Create a store from a [`StoreConfig`].
    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(Partitions::default()),
            capacity: config.capacity,
        })
    }

    /// Window capacity this store was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store one message under `key`.
    ///
    /// The message is classified exactly once, here. A system message
    /// overwrites the key's system slot unconditionally; an interactive
    /// message is appended to the key's window, creating the window on first
    /// use. Appending does **not** enforce capacity — callers check
    /// [`ConversationStore::is_full`] first. A classification failure
    /// returns an error and leaves both partitions untouched.
    pub fn put(&self, key: &str, message: ChatMessage) -> Result<()> {
        let stored = StoredMessage::try_from(message)?;
        let mut state = self.state.lock();

        match stored {
            StoredMessage::System(system) => {
                let replaced = state.system_slots.insert(key.to_string(), system).is_some();
                trace!(key, replaced, "system slot written");
            }
            StoredMessage::Interactive(message) => {
                let window = state.windows.entry(key.to_string()).or_default();
                window.push_back(message);
                let len = window.len();
                trace!(key, len, "interactive message appended");
                if len > self.capacity {
                    debug!(
                        key,
                        len,
                        capacity = self.capacity,
                        "window grew past capacity without an is_full check"
                    );
                }
            }
        }

        Ok(())
    }

    /// Current window for `key`, oldest first.
    ///
    /// Returns an owned copy; an absent key and an emptied key both yield an
    /// empty vector.
    pub fn get(&self, key: &str) -> Vec<InteractiveMessage> {
        let state = self.state.lock();
        state
            .windows
            .get(key)
            .map(|window| window.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Current system message for `key`, if one is set.
    pub fn system_message(&self, key: &str) -> Option<SystemMessage> {
        self.state.lock().system_slots.get(key).cloned()
    }

    /// Remove messages from the front of `key`'s window.
    ///
    /// With `None`, the whole window is cleared. With `Some(n)`, the `n`
    /// oldest messages are dropped (capped at the window length), keeping
    /// the remainder in order. `Some(0)` fails with
    /// [`MemoryError::InvalidCount`]. A key with no window is a successful
    /// no-op. The system slot is never touched.
    pub fn remove(&self, key: &str, count: Option<usize>) -> Result<()> {
        let mut state = self.state.lock();
        let Some(window) = state.windows.get_mut(key) else {
            return Ok(());
        };

        match count {
            None => {
                window.clear();
                trace!(key, "window cleared");
            }
            Some(0) => return Err(MemoryError::InvalidCount),
            Some(requested) => {
                let dropped = requested.min(window.len());
                window.drain(..dropped);
                trace!(key, dropped, remaining = window.len(), "oldest messages dropped");
            }
        }

        Ok(())
    }

    /// Clear the system slot for `key`; silent no-op when none is set.
    pub fn remove_system_message(&self, key: &str) {
        let mut state = self.state.lock();
        if state.system_slots.remove(key).is_some() {
            trace!(key, "system slot cleared");
        }
    }

    /// Whether `key`'s window is at (or past) capacity.
    ///
    /// `false` for a key with no window. Past-capacity windows report `true`
    /// so the flag stays truthful after a caller has overshot the advisory
    /// cap.
    pub fn is_full(&self, key: &str) -> bool {
        let state = self.state.lock();
        state
            .windows
            .get(key)
            .is_some_and(|window| window.len() >= self.capacity)
    }

    /// Number of interactive messages currently held for `key`.
    pub fn len(&self, key: &str) -> usize {
        self.state.lock().windows.get(key).map_or(0, VecDeque::len)
    }

    /// Whether `key` currently holds no interactive messages.
    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }

    /// Messages that can still be appended before `key` hits capacity.
    pub fn remaining_capacity(&self, key: &str) -> usize {
        self.capacity.saturating_sub(self.len(key))
    }
}

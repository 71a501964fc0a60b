//! In-memory value store for option callbacks under test.
//!
//! Option getters and setters in tests read and write through a `MemoryStore` so
//! assertions can inspect both the stored values and how often callbacks ran.

use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

/// Shared JSON key-value store counting reads and writes.
///
/// Cloning is cheap and every clone sees the same data, so a store can be moved into
/// several callback closures.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Value>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value without counting it as a write.
    ///
    /// # Arguments
    /// - `key` - Storage key
    /// - `value` - Initial value
    ///
    /// # Returns
    /// - `Self` - Store instance for method chaining
    pub fn with_value(self, key: impl Into<String>, value: Value) -> Self {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), value);
        self
    }

    /// Reads a value, `Value::Null` when the key was never set.
    pub fn get(&self, key: &str) -> Value {
        self.reads.fetch_add(1, Ordering::SeqCst);

        self.peek(key)
    }

    /// Stores a value, replacing any previous one.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.writes.fetch_add(1, Ordering::SeqCst);

        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), value);
    }

    /// Reads a value without counting the access.
    pub fn peek(&self, key: &str) -> Value {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Number of `get` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

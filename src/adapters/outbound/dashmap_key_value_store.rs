//! DashMap Key-Value Store
//!
//! Implements KeyValueStore in memory using DashMap. Used when no durable
//! storage is wanted (ephemeral sessions, tests).

use crate::domain::ports::KeyValueStore;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory key-value store.
pub struct DashMapKeyValueStore {
    values: Arc<DashMap<String, String>>,
}

impl DashMapKeyValueStore {
    pub fn new() -> Self {
        Self {
            values: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for DashMapKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for DashMapKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|e| e.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

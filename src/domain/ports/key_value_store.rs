//! Key-Value Store Port
//!
//! Defines the interface for durable client-side string storage.

/// Durable string key-value storage.
///
/// The preference store uses a single key. Absence of a key is a normal
/// state (first run or cleared preference).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value atomically.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

//! Durable client-side key/value storage.
//!
//! Stands in for a browser's `localStorage`: string values under string
//! keys, surviving between runs when backed by a file.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::Result;
use crate::error::StorageError;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Durable string storage keyed by name.
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// An in-memory store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

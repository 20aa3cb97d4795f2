//! Durable token storage in the state file.

use std::path::Path;

use tracing::debug;

use natter_core::Result;
use natter_core::storage::TokenStore;

use crate::store::StateFile;

/// A [`TokenStore`] persisted to disk.
///
/// Every call goes to the file, so separate processes sharing a state file
/// see each other's writes.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    file: StateFile,
}

impl FileTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            file: StateFile::new(path),
        }
    }

    pub fn from_state(file: StateFile) -> Self {
        Self { file }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.file.read()?.storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(|data| {
            data.storage.insert(key.to_string(), value.to_string());
        })?;
        debug!(key, "value stored");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let removed = self.file.update(|data| data.storage.remove(key).is_some())?;
        if removed {
            debug!(key, "value removed");
        }
        Ok(())
    }
}

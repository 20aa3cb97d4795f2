//! The JSON state file shared by the token store and cookie jar.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use natter_core::Result;
use natter_core::cookie::CookieSet;
use natter_core::error::{Error, StorageError};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateData {
    /// Durable key/value storage (bearer token lives under `token`).
    #[serde(default)]
    pub storage: BTreeMap<String, String>,
    /// The cookie jar.
    #[serde(default)]
    pub cookies: CookieSet,
}

/// A state file on disk, guarded by a sibling lock file.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Use the state file at `path`. Nothing is created until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Read the current state. A missing or empty file is an empty state.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<StateData> {
        let lock = self.open_lock()?;
        FileExt::lock_shared(&lock).map_err(|e| map_io(&self.lock_path(), e))?;
        let data = self.load();
        let _ = FileExt::unlock(&lock);
        data
    }

    /// Read, modify and write the state under an exclusive lock.
    #[instrument(skip(self, f), fields(path = %self.path.display()))]
    pub fn update<T>(&self, f: impl FnOnce(&mut StateData) -> T) -> Result<T> {
        let lock = self.open_lock()?;
        FileExt::lock_exclusive(&lock).map_err(|e| map_io(&self.lock_path(), e))?;

        let result = self.load().and_then(|mut data| {
            let out = f(&mut data);
            self.save(&data)?;
            Ok(out)
        });

        let _ = FileExt::unlock(&lock);
        result
    }

    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(|e| map_io(&self.lock_path(), e))
    }

    fn load(&self) -> Result<StateData> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StateData::default()),
            Err(e) => return Err(map_io(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(StateData::default());
        }
        serde_json::from_str(&content).map_err(|e| {
            Error::Storage(StorageError::Format {
                message: e.to_string(),
            })
        })
    }

    fn save(&self, data: &StateData) -> Result<()> {
        let json = serde_json::to_string_pretty(data).map_err(|e| {
            Error::Storage(StorageError::Format {
                message: e.to_string(),
            })
        })?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| map_io(&tmp, e))?;

        // Restrictive permissions before the file becomes visible (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&tmp).map_err(|e| map_io(&tmp, e))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp, perms).map_err(|e| map_io(&tmp, e))?;
        }

        fs::rename(&tmp, &self.path).map_err(|e| map_io(&self.path, e))?;
        trace!("state file written");
        Ok(())
    }
}

//! Location of the persisted client state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use natter_file::StateFile;

const STATE_FILE: &str = "state.json";

/// Open the state file under `dir`, or under the platform data directory.
pub fn open(dir: Option<&Path>) -> Result<StateFile> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_dir()?,
    };
    Ok(StateFile::new(dir.join(STATE_FILE)))
}

fn default_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "natter").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

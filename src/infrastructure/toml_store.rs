// SPDX-License-Identifier: MPL-2.0
//! File-backed preference store.
//!
//! Values are kept in `<config dir>/<store name>.toml` as a flat table of
//! strings:
//!
//! ```toml
//! language_code = "fr"
//! ```
//!
//! Each write goes to its own temporary file next to the target and is then
//! renamed over it, so readers never observe a half-written file. Handles on
//! the same path share one lock within the process, so read-modify-write
//! cycles from different handles never drop each other's keys.

use crate::application::port::{PreferenceStore, StoreError};
use crate::paths;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tempfile::NamedTempFile;

type PathLock = Arc<Mutex<()>>;

static PATH_LOCKS: OnceLock<Mutex<HashMap<PathBuf, PathLock>>> = OnceLock::new();

/// Lock shared by every handle on `path`.
///
/// Keyed by the absolute path; symlinks are not resolved.
fn lock_for(path: &Path) -> PathLock {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = PATH_LOCKS
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

#[derive(Debug)]
pub struct TomlPreferenceStore {
    path: PathBuf,
    write_lock: PathLock,
}

impl TomlPreferenceStore {
    /// Uses the file at `path` directly.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            write_lock: lock_for(&path),
            path,
        }
    }

    /// Uses `<dir>/<store_name>.toml`.
    #[must_use]
    pub fn in_dir(dir: &Path, store_name: &str) -> Self {
        Self::new(dir.join(format!("{store_name}.toml")))
    }

    /// Opens the store in the default config directory.
    ///
    /// Returns `None` if no config directory can be determined.
    #[must_use]
    pub fn open(store_name: &str) -> Option<Self> {
        Self::open_with_override(store_name, None)
    }

    /// Opens the store in `base_dir`, or the default config directory.
    #[must_use]
    pub fn open_with_override(store_name: &str, base_dir: Option<PathBuf>) -> Option<Self> {
        paths::get_app_config_dir_with_override(base_dir).map(|dir| Self::in_dir(&dir, store_name))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_table(&self) -> Result<Option<toml::Table>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Read(format!("{}: {e}", self.path.display())))?;
        toml::from_str::<toml::Table>(&content)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn replace_file(&self, content: &str) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .map_err(|e| StoreError::Write(format!("{}: {e}", parent.display())))?;

        let mut tmp = NamedTempFile::new_in(parent)
            .map_err(|e| StoreError::Write(format!("{}: {e}", parent.display())))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| StoreError::Write(format!("{}: {e}", tmp.path().display())))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Write(format!("{}: {}", self.path.display(), e.error)))?;
        Ok(())
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(table) = self.load_table()? else {
            return Ok(None);
        };
        match table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(StoreError::Corrupt(format!(
                "{key} holds a {} instead of a string",
                other.type_str()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut table = match self.load_table() {
            Ok(table) => table.unwrap_or_default(),
            Err(StoreError::Corrupt(reason)) => {
                tracing::warn!(%reason, "replacing corrupt preference file");
                toml::Table::new()
            }
            Err(error) => return Err(error),
        };
        table.insert(key.to_string(), toml::Value::String(value.to_string()));

        let content = toml::to_string(&table).map_err(|e| StoreError::Write(e.to_string()))?;
        self.replace_file(&content)?;

        tracing::debug!(path = %self.path.display(), key, "preference written");
        Ok(())
    }
}

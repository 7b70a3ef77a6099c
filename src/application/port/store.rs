// SPDX-License-Identifier: MPL-2.0
//! Preference store port definition.
//!
//! This module defines the [`PreferenceStore`] trait: a string key-value store
//! living under a fixed store name. The locale manager only ever touches one
//! key, holding the selected language identifier.

use std::fmt;

// =============================================================================
// StoreError
// =============================================================================

/// Errors that can occur while reading or writing preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage could not be read.
    Read(String),

    /// The backing storage exists but its content cannot be decoded.
    Corrupt(String),

    /// The value could not be written.
    Write(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read(msg) => write!(f, "failed to read preferences: {msg}"),
            StoreError::Corrupt(msg) => write!(f, "preferences are corrupt: {msg}"),
            StoreError::Write(msg) => write!(f, "failed to write preferences: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

// =============================================================================
// PreferenceStore
// =============================================================================

/// A durable string key-value store.
///
/// `write` must make the value visible to subsequent `read` calls (from any
/// thread) before it returns. Durability across a crash is up to the
/// implementation.
pub trait PreferenceStore: Send + Sync {
    /// Reads a value. A missing key is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] or [`StoreError::Corrupt`] when the
    /// backing storage cannot be used.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the value was not stored.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(
            StoreError::Write("disk full".into()).to_string(),
            "failed to write preferences: disk full"
        );
        assert!(StoreError::Corrupt("bad".into()).to_string().contains("corrupt"));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Platform locale port definition.
//!
//! The host operating system or UI toolkit is responsible for re-rendering in
//! the new language. This crate only calls into it through [`PlatformLocale`].

use crate::domain::locale::Locale;
use std::fmt;

/// Errors reported by a platform adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform does not support the requested locale.
    Rejected(String),

    /// The platform call itself failed.
    Failed(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Rejected(msg) => write!(f, "locale rejected by platform: {msg}"),
            PlatformError::Failed(msg) => write!(f, "platform locale update failed: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Applies a locale process-wide.
pub trait PlatformLocale: Send + Sync {
    /// Applies `locale` to the running application.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] when the change did not take effect.
    fn apply(&self, locale: &Locale) -> Result<(), PlatformError>;
}

impl<T: PlatformLocale + ?Sized> PlatformLocale for std::sync::Arc<T> {
    fn apply(&self, locale: &Locale) -> Result<(), PlatformError> {
        (**self).apply(locale)
    }
}

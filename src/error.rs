// SPDX-License-Identifier: MPL-2.0
use crate::application::port::{PlatformError, StoreError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The identifier is not a well-formed language tag.
    InvalidIdentifier(String),

    /// The identifier is well-formed but absent from the current catalog.
    UnknownIdentifier(String),

    /// Reading or writing the preference store failed.
    Store(StoreError),

    /// The platform rejected or failed to apply the locale.
    ///
    /// The new identifier is already persisted and published when this is
    /// returned; see [`LocaleManager::reapply`](crate::manager::LocaleManager::reapply).
    Platform(PlatformError),

    Config(String),
    Io(String),
}

impl Error {
    /// Returns the i18n message key hosts can use to present this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::InvalidIdentifier(_) => "error-locale-invalid-identifier",
            Error::UnknownIdentifier(_) => "error-locale-unknown-identifier",
            Error::Store(_) => "error-locale-save-failed",
            Error::Platform(_) => "error-locale-apply-failed",
            Error::Config(_) => "notification-config-load-error",
            Error::Io(_) => "error-io",
        }
    }

    /// Whether the language change was persisted despite the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Error::Platform(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIdentifier(id) => write!(f, "Invalid language identifier: {:?}", id),
            Error::UnknownIdentifier(id) => {
                write!(f, "Language identifier not in catalog: {}", id)
            }
            Error::Store(e) => write!(f, "Store Error: {}", e),
            Error::Platform(e) => write!(f, "Platform Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<PlatformError> for Error {
    fn from(err: PlatformError) -> Self {
        Error::Platform(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

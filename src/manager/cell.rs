// SPDX-License-Identifier: MPL-2.0
//! One-manager-per-process helpers.
//!
//! Prefer constructing a [`LocaleManager`] in the composition root and passing
//! the `Arc` around. [`LocaleCell`] covers hosts that need lazy, idempotent
//! initialization instead; [`initialize`] and [`global`] use a process-wide
//! cell.

use super::{LocaleManager, LocaleState};
use crate::application::port::{PlatformLocale, PreferenceStore};
use crate::config::Config;
use crate::domain::Catalog;
use crate::error::Result;
use std::sync::{Arc, OnceLock};

static GLOBAL: LocaleCell = LocaleCell::new();

/// Lazily holds exactly one [`LocaleManager`].
#[derive(Debug, Default)]
pub struct LocaleCell {
    inner: OnceLock<Arc<LocaleManager>>,
}

impl LocaleCell {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Returns the manager, constructing it on the first call.
    ///
    /// Concurrent first calls block until one of them has finished
    /// construction; the store is read exactly once. Arguments passed to
    /// later calls are dropped unused.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if the cell is
    /// still empty and `config` is invalid.
    pub fn initialize<S, P>(&self, store: S, platform: P, config: Config) -> Result<Arc<LocaleManager>>
    where
        S: PreferenceStore + 'static,
        P: PlatformLocale + 'static,
    {
        if let Some(manager) = self.inner.get() {
            return Ok(Arc::clone(manager));
        }
        config.validate()?;
        let fallback = LocaleState::fallback(&config)?;
        let manager = self.inner.get_or_init(|| {
            Arc::new(LocaleManager::build(
                Box::new(store),
                Box::new(platform),
                config,
                Catalog::builtin(),
                fallback,
            ))
        });
        Ok(Arc::clone(manager))
    }

    /// The manager, if already initialized.
    #[must_use]
    pub fn get(&self) -> Option<Arc<LocaleManager>> {
        self.inner.get().cloned()
    }
}

/// Initializes (or returns) the process-wide manager.
///
/// # Errors
///
/// See [`LocaleCell::initialize`].
pub fn initialize<S, P>(store: S, platform: P, config: Config) -> Result<Arc<LocaleManager>>
where
    S: PreferenceStore + 'static,
    P: PlatformLocale + 'static,
{
    GLOBAL.initialize(store, platform, config)
}

/// The process-wide manager, if [`initialize`] has run.
#[must_use]
pub fn global() -> Option<Arc<LocaleManager>> {
    GLOBAL.get()
}

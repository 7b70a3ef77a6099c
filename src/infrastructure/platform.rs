// SPDX-License-Identifier: MPL-2.0
//! Platform locale adapters.
//!
//! Real hosts supply their own [`PlatformLocale`] (or wrap a callback in
//! [`FnPlatform`]). [`NoopPlatform`] suits hosts that only react through the
//! manager's streams; [`RecordingPlatform`] keeps a log of applied tags.

use crate::application::port::{PlatformError, PlatformLocale};
use crate::domain::Locale;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Reads the operating system's preferred locale.
///
/// Returns `None` when the OS reports nothing or reports a tag that does not
/// parse (e.g. POSIX `C`).
#[must_use]
pub fn system_locale() -> Option<Locale> {
    let raw = sys_locale::get_locale()?;
    // POSIX locales may carry an encoding suffix ("en_US.UTF-8").
    let tag = raw.split('.').next().unwrap_or(&raw);
    Locale::parse(tag).ok()
}

/// Does nothing; always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPlatform;

impl PlatformLocale for NoopPlatform {
    fn apply(&self, _locale: &Locale) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Adapter backed by a closure.
pub struct FnPlatform<F> {
    apply: F,
}

impl<F> FnPlatform<F>
where
    F: Fn(&Locale) -> Result<(), PlatformError> + Send + Sync,
{
    pub fn new(apply: F) -> Self {
        Self { apply }
    }
}

impl<F> fmt::Debug for FnPlatform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPlatform").finish_non_exhaustive()
    }
}

impl<F> PlatformLocale for FnPlatform<F>
where
    F: Fn(&Locale) -> Result<(), PlatformError> + Send + Sync,
{
    fn apply(&self, locale: &Locale) -> Result<(), PlatformError> {
        (self.apply)(locale)
    }
}

#[derive(Debug, Default)]
struct Recording {
    applied: Vec<String>,
    rejected: HashSet<String>,
}

/// Records every applied tag; can be told to reject specific tags.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlatform {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `apply` fail for this canonical tag.
    pub fn reject(&self, tag: &str) {
        self.lock().rejected.insert(tag.to_string());
    }

    /// Stops rejecting every tag.
    pub fn accept_all(&self) {
        self.lock().rejected.clear();
    }

    /// Canonical tags successfully applied so far, in order.
    #[must_use]
    pub fn applied(&self) -> Vec<String> {
        self.lock().applied.clone()
    }

    /// Last successfully applied tag.
    #[must_use]
    pub fn last_applied(&self) -> Option<String> {
        self.lock().applied.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlatformLocale for RecordingPlatform {
    fn apply(&self, locale: &Locale) -> Result<(), PlatformError> {
        let tag = locale.tag();
        let mut recording = self.lock();
        if recording.rejected.contains(&tag) {
            return Err(PlatformError::Rejected(tag));
        }
        recording.applied.push(tag);
        Ok(())
    }
}

// SPDX-License-Identifier: MPL-2.0
//! The locale state holder.
//!
//! [`LocaleManager`] owns the selected language identifier and the
//! [`Locale`] derived from it, persists the identifier through a
//! [`PreferenceStore`], publishes every committed change to subscribers and
//! forwards it to the host's [`PlatformLocale`].
//!
//! # Committing a change
//!
//! [`LocaleManager::set_locale`] runs these steps under one writer lock:
//!
//! 1. validate the identifier (well-formed, and listed in the catalog when
//!    `strict_catalog` is on);
//! 2. write it to the store;
//! 3. swap the in-memory snapshot and publish to the identifier stream, then
//!    to the locale stream;
//! 4. apply it to the platform.
//!
//! A failure in steps 1 or 2 leaves everything untouched. A platform failure
//! in step 4 is returned to the caller, but the change stays committed.
//!
//! # Example
//!
//! ```
//! use locale_switch::config::Config;
//! use locale_switch::infrastructure::{MemoryPreferenceStore, NoopPlatform};
//! use locale_switch::manager::LocaleManager;
//!
//! let manager = LocaleManager::new(MemoryPreferenceStore::new(), NoopPlatform, Config::default())?;
//! let mut changes = manager.observe_identifier();
//!
//! manager.set_locale("fr")?;
//!
//! assert_eq!(manager.current_identifier(), "fr");
//! assert_eq!(changes.drain(), vec!["en".to_string(), "fr".to_string()]);
//! # Ok::<(), locale_switch::error::Error>(())
//! ```

mod cell;
mod observable;

pub use cell::{global, initialize, LocaleCell};
pub use observable::Subscription;

use crate::application::port::{PlatformLocale, PreferenceStore, StoreError};
use crate::config::Config;
use crate::domain::{Catalog, LanguageEntry, Locale};
use crate::error::{Error, Result};
use crate::infrastructure::system_locale;
use observable::Broadcast;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

// =============================================================================
// LocaleState
// =============================================================================

/// Immutable snapshot of the selection: the identifier and its derived locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleState {
    identifier: String,
    locale: Locale,
}

impl LocaleState {
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if `identifier` does not parse.
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        let locale = Locale::parse(&identifier)?;
        Ok(Self { identifier, locale })
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    fn fallback(config: &Config) -> Result<Self> {
        Self::new(config.general.default_language.clone()).map_err(|_| {
            Error::Config(format!(
                "invalid default_language: {:?}",
                config.general.default_language
            ))
        })
    }
}

/// Picks the starting state from what the store returned.
///
/// Missing, unreadable or malformed values fall back to the system locale
/// (only when `follow_system_locale` is set and the catalog offers a match)
/// and then to `fallback`.
fn initial_state(
    stored: std::result::Result<Option<String>, StoreError>,
    system: Option<Locale>,
    config: &Config,
    catalog: &Catalog,
    fallback: LocaleState,
) -> LocaleState {
    match stored {
        Ok(Some(identifier)) => match LocaleState::new(identifier) {
            Ok(state) => return state,
            Err(error) => tracing::warn!(%error, "ignoring corrupt persisted language"),
        },
        Ok(None) => tracing::debug!("no persisted language"),
        Err(error) => tracing::warn!(%error, "ignoring unreadable persisted language"),
    }

    if config.general.follow_system_locale {
        if let Some(entry) = system.as_ref().and_then(|locale| catalog.best_match(locale)) {
            tracing::debug!(identifier = entry.identifier(), "using system locale");
            return LocaleState {
                identifier: entry.identifier().to_string(),
                locale: entry.locale().clone(),
            };
        }
    }

    fallback
}

// =============================================================================
// LocaleManager
// =============================================================================

pub struct LocaleManager {
    store: Box<dyn PreferenceStore>,
    platform: Box<dyn PlatformLocale>,
    config: Config,
    state: RwLock<Arc<LocaleState>>,
    catalog: RwLock<Catalog>,
    // Serializes persist + publish + platform apply.
    write_lock: Mutex<()>,
    identifiers: Broadcast<String>,
    locales: Broadcast<Locale>,
}

impl LocaleManager {
    /// Creates a manager with the built-in catalog.
    ///
    /// Reads the persisted identifier exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` is invalid. Store problems are
    /// not errors here: they fall back to the default language.
    pub fn new<S, P>(store: S, platform: P, config: Config) -> Result<Self>
    where
        S: PreferenceStore + 'static,
        P: PlatformLocale + 'static,
    {
        Self::with_catalog(store, platform, config, Catalog::builtin())
    }

    /// Creates a manager with a host-supplied catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` is invalid.
    pub fn with_catalog<S, P>(store: S, platform: P, config: Config, catalog: Catalog) -> Result<Self>
    where
        S: PreferenceStore + 'static,
        P: PlatformLocale + 'static,
    {
        config.validate()?;
        let fallback = LocaleState::fallback(&config)?;
        Ok(Self::build(
            Box::new(store),
            Box::new(platform),
            config,
            catalog,
            fallback,
        ))
    }

    fn build(
        store: Box<dyn PreferenceStore>,
        platform: Box<dyn PlatformLocale>,
        config: Config,
        catalog: Catalog,
        fallback: LocaleState,
    ) -> Self {
        let stored = store.read(&config.store.language_key);
        let system = if config.general.follow_system_locale {
            system_locale()
        } else {
            None
        };
        let state = initial_state(stored, system, &config, &catalog, fallback);
        tracing::debug!(identifier = state.identifier(), "locale manager ready");

        Self {
            identifiers: Broadcast::new(state.identifier.clone()),
            locales: Broadcast::new(state.locale.clone()),
            state: RwLock::new(Arc::new(state)),
            catalog: RwLock::new(catalog),
            write_lock: Mutex::new(()),
            store,
            platform,
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Snapshot reads
    // -------------------------------------------------------------------------

    /// The current selection as one consistent snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<LocaleState> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn current_identifier(&self) -> String {
        self.state().identifier.clone()
    }

    #[must_use]
    pub fn current_locale(&self) -> Locale {
        self.state().locale.clone()
    }

    #[must_use]
    pub fn is_selected(&self, identifier: &str) -> bool {
        self.state().identifier == identifier
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Streams
    // -------------------------------------------------------------------------

    /// Subscribes to the selected identifier.
    ///
    /// The current identifier is available immediately; every later
    /// successful [`set_locale`](Self::set_locale) adds one item.
    #[must_use]
    pub fn observe_identifier(&self) -> Subscription<String> {
        self.identifiers.subscribe()
    }

    /// Subscribes to the derived locale, with the same delivery rules as
    /// [`observe_identifier`](Self::observe_identifier).
    #[must_use]
    pub fn observe_locale(&self) -> Subscription<Locale> {
        self.locales.subscribe()
    }

    /// Number of live subscribers across both streams.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.identifiers.subscriber_count() + self.locales.subscriber_count()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Commits a new language.
    ///
    /// Calling it with the current identifier still persists, publishes and
    /// applies again.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIdentifier`]: not a language tag; nothing changed.
    /// - [`Error::UnknownIdentifier`]: `strict_catalog` is on and the catalog
    ///   has no such entry; nothing changed.
    /// - [`Error::Store`]: the write failed; nothing changed.
    /// - [`Error::Platform`]: persisted and published, but the platform did
    ///   not apply it. Use [`reapply`](Self::reapply) to retry.
    pub fn set_locale(&self, identifier: &str) -> Result<()> {
        let next = LocaleState::new(identifier)?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.config.general.strict_catalog && !self.catalog().contains(identifier) {
            tracing::debug!(identifier, "rejecting language missing from catalog");
            return Err(Error::UnknownIdentifier(identifier.to_string()));
        }

        self.store.write(&self.config.store.language_key, identifier)?;

        let next = Arc::new(next);
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
        self.identifiers.publish(next.identifier.clone());
        self.locales.publish(next.locale.clone());
        tracing::info!(identifier, locale = %next.locale, "language changed");

        self.apply(&next.locale)
    }

    /// Applies the current locale to the platform again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Platform`] if the platform still refuses.
    pub fn reapply(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let state = self.state();
        self.apply(&state.locale)
    }

    fn apply(&self, locale: &Locale) -> Result<()> {
        self.platform.apply(locale).map_err(|error| {
            tracing::warn!(%locale, %error, "platform did not apply locale");
            Error::Platform(error)
        })
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the catalog wholesale.
    ///
    /// The current selection is kept even if the new catalog omits it.
    /// Duplicate identifiers are accepted and logged.
    pub fn set_catalog(&self, catalog: impl Into<Catalog>) {
        let catalog = catalog.into();
        let duplicates = catalog.duplicate_identifiers();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "catalog contains duplicate identifiers");
        }
        tracing::debug!(entries = catalog.len(), "catalog replaced");
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = catalog;
    }

    /// First catalog entry for `identifier`.
    #[must_use]
    pub fn language_entry(&self, identifier: &str) -> Option<LanguageEntry> {
        self.catalog().find(identifier).cloned()
    }

    /// Catalog entry for the current selection, if listed.
    #[must_use]
    pub fn current_entry(&self) -> Option<LanguageEntry> {
        self.language_entry(&self.current_identifier())
    }
}

impl fmt::Debug for LocaleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleManager")
            .field("state", &self.state())
            .field("catalog_len", &self.catalog().len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::PlatformError;
    use crate::config::DEFAULT_LANGUAGE_KEY;
    use crate::infrastructure::{MemoryPreferenceStore, NoopPlatform, RecordingPlatform};

    fn entry(id: &str) -> LanguageEntry {
        LanguageEntry::new(id, format!("language_{id}"), format!("img_flag_{id}")).unwrap()
    }

    fn manager_with(store: MemoryPreferenceStore, platform: RecordingPlatform) -> LocaleManager {
        LocaleManager::new(store, platform, Config::default()).unwrap()
    }

    fn lenient() -> Config {
        let mut config = Config::default();
        config.general.strict_catalog = false;
        config
    }

    #[test]
    fn starts_with_default_when_store_empty() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        assert_eq!(manager.current_identifier(), "en");
        assert_eq!(manager.current_locale().language(), "en");
    }

    #[test]
    fn starts_with_persisted_identifier() {
        let store = MemoryPreferenceStore::with_value(DEFAULT_LANGUAGE_KEY, "pt-BR");
        let manager = manager_with(store, RecordingPlatform::new());
        assert_eq!(manager.current_identifier(), "pt-BR");
        assert_eq!(manager.current_locale().region(), Some("BR"));
    }

    #[test]
    fn corrupt_persisted_value_falls_back_to_default() {
        let store = MemoryPreferenceStore::with_value(DEFAULT_LANGUAGE_KEY, "%%garbage%%");
        let manager = manager_with(store, RecordingPlatform::new());
        assert_eq!(manager.current_identifier(), "en");
    }

    #[test]
    fn construction_reads_store_once_and_does_not_apply() {
        let store = MemoryPreferenceStore::new();
        let platform = RecordingPlatform::new();
        let _manager = manager_with(store.clone(), platform.clone());
        assert_eq!(store.read_count(), 1);
        assert!(platform.applied().is_empty());
    }

    #[test]
    fn configured_default_language_is_used() {
        let mut config = Config::default();
        config.general.default_language = "ja".to_string();
        let manager = LocaleManager::new(MemoryPreferenceStore::new(), NoopPlatform, config).unwrap();
        assert_eq!(manager.current_identifier(), "ja");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = Config::default();
        config.general.default_language = String::new();
        let result = LocaleManager::new(MemoryPreferenceStore::new(), NoopPlatform, config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn set_locale_persists_publishes_and_applies() {
        let store = MemoryPreferenceStore::new();
        let platform = RecordingPlatform::new();
        let manager = manager_with(store.clone(), platform.clone());
        let mut ids = manager.observe_identifier();
        let mut locales = manager.observe_locale();

        manager.set_locale("vi").unwrap();

        assert_eq!(manager.current_identifier(), "vi");
        assert_eq!(store.peek(DEFAULT_LANGUAGE_KEY).as_deref(), Some("vi"));
        assert_eq!(ids.drain(), vec!["en", "vi"]);
        let tags: Vec<String> = locales.drain().iter().map(Locale::tag).collect();
        assert_eq!(tags, vec!["en", "vi"]);
        assert_eq!(platform.applied(), vec!["vi"]);
    }

    #[test]
    fn subscription_yields_current_value_immediately() {
        let store = MemoryPreferenceStore::with_value(DEFAULT_LANGUAGE_KEY, "ko");
        let manager = manager_with(store, RecordingPlatform::new());

        let mut ids = manager.observe_identifier();
        let mut locales = manager.observe_locale();

        assert_eq!(ids.try_recv().as_deref(), Some("ko"));
        assert_eq!(locales.try_recv().map(|l| l.tag()).as_deref(), Some("ko"));
        assert_eq!(ids.try_recv(), None);
    }

    #[test]
    fn every_subscriber_sees_every_change_in_order() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        let mut first = manager.observe_identifier();
        let mut second = manager.observe_identifier();

        for id in ["vi", "en", "ja"] {
            manager.set_locale(id).unwrap();
        }

        assert_eq!(first.drain(), vec!["en", "vi", "en", "ja"]);
        assert_eq!(second.drain(), vec!["en", "vi", "en", "ja"]);
    }

    #[test]
    fn setting_same_identifier_emits_again() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        let mut ids = manager.observe_identifier();
        manager.set_locale("en").unwrap();
        assert_eq!(ids.drain(), vec!["en", "en"]);
    }

    #[test]
    fn is_selected_is_exclusive() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        manager.set_locale("fr").unwrap();
        assert!(manager.is_selected("fr"));
        assert!(!manager.is_selected("en"));
        assert!(!manager.is_selected("fr-FR"));
    }

    #[test]
    fn malformed_identifier_changes_nothing() {
        let store = MemoryPreferenceStore::new();
        let platform = RecordingPlatform::new();
        let manager = manager_with(store.clone(), platform.clone());
        let mut ids = manager.observe_identifier();

        let result = manager.set_locale("not a tag");

        assert!(matches!(result, Err(Error::InvalidIdentifier(_))));
        assert_eq!(manager.current_identifier(), "en");
        assert_eq!(store.peek(DEFAULT_LANGUAGE_KEY), None);
        assert_eq!(ids.drain(), vec!["en"]);
        assert!(platform.applied().is_empty());
    }

    #[test]
    fn strict_catalog_rejects_unlisted_identifier() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        manager.set_catalog(vec![entry("en"), entry("fr")]);

        let result = manager.set_locale("de");

        assert_eq!(result, Err(Error::UnknownIdentifier("de".to_string())));
        assert_eq!(manager.current_identifier(), "en");
    }

    #[test]
    fn lenient_catalog_accepts_unlisted_identifier() {
        let manager =
            LocaleManager::new(MemoryPreferenceStore::new(), NoopPlatform, lenient()).unwrap();
        manager.set_catalog(Catalog::empty());

        manager.set_locale("eo").unwrap();

        assert_eq!(manager.current_identifier(), "eo");
    }

    #[test]
    fn store_failure_changes_nothing() {
        let store = MemoryPreferenceStore::new();
        let platform = RecordingPlatform::new();
        let manager = manager_with(store.clone(), platform.clone());
        let mut ids = manager.observe_identifier();
        store.set_fail_writes(true);

        let result = manager.set_locale("fr");

        assert!(matches!(result, Err(Error::Store(_))));
        assert_eq!(manager.current_identifier(), "en");
        assert_eq!(ids.drain(), vec!["en"]);
        assert!(platform.applied().is_empty());
    }

    #[test]
    fn platform_failure_is_reported_but_committed() {
        let store = MemoryPreferenceStore::new();
        let platform = RecordingPlatform::new();
        platform.reject("ja");
        let manager = manager_with(store.clone(), platform.clone());
        let mut ids = manager.observe_identifier();

        let result = manager.set_locale("ja");

        match result {
            Err(ref error @ Error::Platform(PlatformError::Rejected(_))) => {
                assert!(error.is_committed());
            }
            other => panic!("expected platform rejection, got {:?}", other),
        }
        assert_eq!(manager.current_identifier(), "ja");
        assert_eq!(store.peek(DEFAULT_LANGUAGE_KEY).as_deref(), Some("ja"));
        assert_eq!(ids.drain(), vec!["en", "ja"]);

        platform.accept_all();
        manager.reapply().unwrap();
        assert_eq!(platform.applied(), vec!["ja"]);
    }

    #[test]
    fn empty_catalog_keeps_committed_identifier() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        manager.set_locale("fr").unwrap();

        manager.set_catalog(Catalog::empty());

        assert!(manager.catalog().is_empty());
        assert!(manager.is_selected("fr"));
        assert_eq!(manager.current_entry(), None);
    }

    #[test]
    fn duplicate_catalog_entries_are_kept() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        manager.set_catalog(vec![entry("en"), entry("en"), entry("fr")]);

        let catalog = manager.catalog();
        assert_eq!(catalog.len(), 3);
        let selected = catalog.iter().filter(|e| manager.is_selected(e.identifier())).count();
        assert_eq!(selected, 2);
    }

    #[test]
    fn language_entry_lookups() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        assert_eq!(
            manager.current_entry().map(|e| e.name_ref().to_string()).as_deref(),
            Some("language_english")
        );
        assert!(manager.language_entry("pt-PT").is_some());
        assert!(manager.language_entry("xx").is_none());
    }

    #[test]
    fn dropped_subscriptions_are_released() {
        let manager = manager_with(MemoryPreferenceStore::new(), RecordingPlatform::new());
        let ids = manager.observe_identifier();
        let _locales = manager.observe_locale();
        assert_eq!(manager.subscriber_count(), 2);
        drop(ids);
        assert_eq!(manager.subscriber_count(), 1);
    }

    #[test]
    fn initial_state_prefers_stored_value() {
        let config = Config::default();
        let fallback = LocaleState::fallback(&config).unwrap();
        let state = initial_state(
            Ok(Some("de".to_string())),
            Locale::parse("fr").ok(),
            &config,
            &Catalog::builtin(),
            fallback,
        );
        assert_eq!(state.identifier(), "de");
    }

    #[test]
    fn initial_state_follows_system_locale_when_enabled() {
        let mut config = Config::default();
        config.general.follow_system_locale = true;
        let fallback = LocaleState::fallback(&config).unwrap();

        let state = initial_state(
            Ok(None),
            Locale::parse("pt-BR").ok(),
            &config,
            &Catalog::builtin(),
            fallback,
        );

        assert_eq!(state.identifier(), "pt-BR");
    }

    #[test]
    fn initial_state_ignores_system_locale_when_disabled() {
        let config = Config::default();
        let fallback = LocaleState::fallback(&config).unwrap();
        let state = initial_state(
            Ok(None),
            Locale::parse("fr").ok(),
            &config,
            &Catalog::builtin(),
            fallback,
        );
        assert_eq!(state.identifier(), "en");
    }

    #[test]
    fn initial_state_falls_back_when_system_locale_unlisted() {
        let mut config = Config::default();
        config.general.follow_system_locale = true;
        let fallback = LocaleState::fallback(&config).unwrap();
        let state = initial_state(
            Err(StoreError::Read("gone".into())),
            Locale::parse("sw").ok(),
            &config,
            &Catalog::builtin(),
            fallback,
        );
        assert_eq!(state.identifier(), "en");
    }
}

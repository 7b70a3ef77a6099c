// SPDX-License-Identifier: MPL-2.0
//! This module handles the library's configuration, loaded from a
//! `locale.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Fallback language and catalog policy
//! - `[store]` - Preference store name and key
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `LOCALE_SWITCH_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use locale_switch::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.default_language = "fr".to_string();
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "locale.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Language selection policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Identifier used when the store holds nothing usable.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Prefer the OS locale (when listed in the catalog) over
    /// `default_language` on first start.
    #[serde(default = "default_follow_system_locale")]
    pub follow_system_locale: bool,

    /// Reject `set_locale` calls for identifiers absent from the catalog.
    #[serde(default = "default_strict_catalog")]
    pub strict_catalog: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            follow_system_locale: DEFAULT_FOLLOW_SYSTEM_LOCALE,
            strict_catalog: DEFAULT_STRICT_CATALOG,
        }
    }
}

/// Where the selected identifier is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_language_key")]
    pub language_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            language_key: default_language_key(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Library configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or an invalid
    /// `default_language`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if crate::domain::Locale::parse(&self.general.default_language).is_err() {
            return Err(Error::Config(format!(
                "invalid default_language: {:?}",
                self.general.default_language
            )));
        }
        if self.store.name.trim().is_empty() {
            return Err(Error::Config("store name must not be empty".to_string()));
        }
        if self.store.language_key.trim().is_empty() {
            return Err(Error::Config("language_key must not be empty".to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_follow_system_locale() -> bool {
    DEFAULT_FOLLOW_SYSTEM_LOCALE
}

fn default_strict_catalog() -> bool {
    DEFAULT_STRICT_CATALOG
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_language_key() -> String {
    DEFAULT_LANGUAGE_KEY.to_string()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// its content is invalid.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns [`Error::Io`] on filesystem failures.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                default_language: "fr".to_string(),
                follow_system_locale: true,
                strict_catalog: false,
            },
            store: StoreConfig {
                name: "prefs".to_string(),
                language_key: "lang".to_string(),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("locale.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("locale.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::from_toml_str("[general]\nstrict_catalog = false\n").unwrap();
        assert_eq!(config.general.default_language, DEFAULT_LANGUAGE);
        assert!(!config.general.strict_catalog);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn invalid_default_language_is_rejected() {
        let result = Config::from_toml_str("[general]\ndefault_language = \"not a tag\"\n");
        match result {
            Err(Error::Config(message)) => assert!(message.contains("default_language")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn empty_store_name_is_rejected() {
        let result = Config::from_toml_str("[store]\nname = \"  \"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.default_language, "en");
        assert!(!config.general.follow_system_locale);
        assert!(config.general.strict_catalog);
        assert_eq!(config.store.name, "locale_prefs");
        assert_eq!(config.store.language_key, "language_code");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_with_override_returns_warning_on_bad_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\n").unwrap();

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let mut config = Config::default();
        config.general.default_language = "de".to_string();

        save_with_override(&config, Some(base_dir.clone())).expect("failed to save");
        let (loaded, warning) = load_with_override(Some(base_dir));

        assert!(warning.is_none());
        assert_eq!(loaded.general.default_language, "de");
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }
}

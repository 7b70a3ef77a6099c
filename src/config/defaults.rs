// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Language**: Fallback identifier and catalog policy
//! - **Store**: Preference store naming

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Identifier used when nothing usable was persisted.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Whether to try the OS locale before the fallback identifier.
pub const DEFAULT_FOLLOW_SYSTEM_LOCALE: bool = false;

/// Whether `set_locale` rejects identifiers missing from the catalog.
pub const DEFAULT_STRICT_CATALOG: bool = true;

// ==========================================================================
// Store Defaults
// ==========================================================================

/// Name of the preference store (file stem for the TOML store).
pub const DEFAULT_STORE_NAME: &str = "locale_prefs";

/// Key holding the selected language identifier.
pub const DEFAULT_LANGUAGE_KEY: &str = "language_code";

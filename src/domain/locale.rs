// SPDX-License-Identifier: MPL-2.0
//! Locale value derived from a language identifier.
//!
//! A [`Locale`] is a pure function of the identifier string it was parsed
//! from: the same identifier always yields an equal `Locale`, in this process
//! or after a restart.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A parsed language tag (language, optional script, optional region).
///
/// # Example
///
/// ```
/// use locale_switch::domain::Locale;
///
/// let locale = Locale::parse("pt-BR").unwrap();
/// assert_eq!(locale.language(), "pt");
/// assert_eq!(locale.region(), Some("BR"));
/// assert_eq!(locale.tag(), "pt-BR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    langid: LanguageIdentifier,
}

impl Locale {
    /// Parses a language identifier such as `"en"`, `"es-MX"` or `"zh-Hant-TW"`.
    ///
    /// Surrounding whitespace is rejected rather than trimmed, so that the
    /// identifier that gets persisted is exactly the one that was validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for empty or malformed tags.
    pub fn parse(identifier: &str) -> Result<Self> {
        if identifier.is_empty() || identifier.trim() != identifier {
            return Err(Error::InvalidIdentifier(identifier.to_string()));
        }
        identifier
            .parse::<LanguageIdentifier>()
            .map(|langid| Self { langid })
            .map_err(|_| Error::InvalidIdentifier(identifier.to_string()))
    }

    /// Primary language subtag, lowercase (e.g. `"pt"`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.langid.language.as_str()
    }

    /// Script subtag, if any (e.g. `"Hant"`).
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.langid.script.as_ref().map(|script| script.as_str())
    }

    /// Region subtag, if any (e.g. `"BR"`).
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.langid.region.as_ref().map(|region| region.as_str())
    }

    /// Canonical BCP 47 form of the tag.
    #[must_use]
    pub fn tag(&self) -> String {
        self.langid.to_string()
    }

    /// True when both locales share the same primary language.
    #[must_use]
    pub fn same_language(&self, other: &Locale) -> bool {
        self.langid.language == other.langid.language
    }

    #[must_use]
    pub fn as_language_identifier(&self) -> &LanguageIdentifier {
        &self.langid
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.langid)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Locale> for LanguageIdentifier {
    fn from(locale: Locale) -> Self {
        locale.langid
    }
}

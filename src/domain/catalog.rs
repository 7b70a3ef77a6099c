// SPDX-License-Identifier: MPL-2.0
//! Language catalog types.
//!
//! A [`Catalog`] is the ordered list of languages an application offers.
//! Order is display order. The catalog performs no deduplication: two entries
//! with the same identifier are both kept and both shown.

use super::locale::Locale;
use crate::error::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Built-in seed entries: `(identifier, name reference, icon reference)`.
///
/// Hosts are expected to replace these with their own resource references.
const BUILTIN_LANGUAGES: &[(&str, &str, &str)] = &[
    ("en", "language_english", "img_flag_en"),
    ("ko", "language_korean", "img_flag_ko"),
    ("zh", "language_chinese", "img_flag_zh"),
    ("fil", "language_filipino", "img_flag_fil"),
    ("fr", "language_french", "img_flag_fr"),
    ("de", "language_german", "img_flag_de"),
    ("es", "language_spanish", "img_flag_es"),
    ("nl", "language_dutch", "img_flag_nl"),
    ("pt-PT", "language_portuguese_pt", "img_flag_pt_pt"),
    ("pt-BR", "language_portuguese_br", "img_flag_pt_br"),
    ("ru", "language_russian", "img_flag_ru"),
    ("in", "language_indonesian", "img_flag_id"),
    ("af", "language_afrikaans", "img_flag_af"),
    ("bn", "language_bengali", "img_flag_bn"),
    ("hi", "language_hindi", "img_flag_mr"),
    ("vi", "language_vietnamese", "img_flag_vn"),
    ("ja", "language_japanese", "img_flag_jp"),
];

// =============================================================================
// LanguageEntry
// =============================================================================

/// One selectable language.
///
/// `name_ref` and `icon_ref` are opaque to this crate; typically resource keys
/// the host resolves when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    identifier: String,
    locale: Locale,
    name_ref: String,
    icon_ref: String,
}

impl LanguageEntry {
    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`](crate::error::Error::InvalidIdentifier)
    /// if `identifier` is not a well-formed language tag.
    pub fn new(
        identifier: impl Into<String>,
        name_ref: impl Into<String>,
        icon_ref: impl Into<String>,
    ) -> Result<Self> {
        let identifier = identifier.into();
        let locale = Locale::parse(&identifier)?;
        Ok(Self {
            identifier,
            locale,
            name_ref: name_ref.into(),
            icon_ref: icon_ref.into(),
        })
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn name_ref(&self) -> &str {
        &self.name_ref
    }

    #[must_use]
    pub fn icon_ref(&self) -> &str {
        &self.icon_ref
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, cheaply clonable list of [`LanguageEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Arc<[LanguageEntry]>,
}

impl Catalog {
    #[must_use]
    pub fn new(entries: Vec<LanguageEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The seed catalog shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_LANGUAGES
            .iter()
            .filter_map(|(id, name, icon)| LanguageEntry::new(*id, *name, *icon).ok())
            .collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguageEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    /// First entry with the given identifier.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<&LanguageEntry> {
        self.entries
            .iter()
            .find(|entry| entry.identifier == identifier)
    }

    /// Entry best matching `locale`: an exact locale match, otherwise the
    /// first entry with the same primary language.
    #[must_use]
    pub fn best_match(&self, locale: &Locale) -> Option<&LanguageEntry> {
        self.entries
            .iter()
            .find(|entry| entry.locale == *locale)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| entry.locale.same_language(locale))
            })
    }

    /// Identifiers that appear more than once, in first-repeat order.
    #[must_use]
    pub fn duplicate_identifiers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in self.entries.iter() {
            let id = entry.identifier.as_str();
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }
}

impl From<Vec<LanguageEntry>> for Catalog {
    fn from(entries: Vec<LanguageEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<LanguageEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = LanguageEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a LanguageEntry;
    type IntoIter = std::slice::Iter<'a, LanguageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

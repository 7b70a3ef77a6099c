// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core locale types.
//!
//! This module contains value objects only. Apart from `unic-langid` for tag
//! parsing it has no dependencies on external crates, which keeps it easy to
//! test in isolation.
//!
//! # Modules
//!
//! - [`locale`]: The derived [`Locale`] value
//! - [`catalog`]: [`LanguageEntry`] and the ordered [`Catalog`]

pub mod catalog;
pub mod locale;

pub use catalog::{Catalog, LanguageEntry};
pub use locale::Locale;

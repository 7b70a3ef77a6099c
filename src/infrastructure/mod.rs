// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`toml_store`]: File-backed [`PreferenceStore`] in the config directory
//! - [`memory_store`]: In-process [`PreferenceStore`]
//! - [`platform`]: Simple [`PlatformLocale`] adapters and OS locale lookup
//!
//! [`PreferenceStore`]: crate::application::port::PreferenceStore
//! [`PlatformLocale`]: crate::application::port::PlatformLocale

pub mod memory_store;
pub mod platform;
pub mod toml_store;

pub use memory_store::MemoryPreferenceStore;
pub use platform::{system_locale, FnPlatform, NoopPlatform, RecordingPlatform};
pub use toml_store::TomlPreferenceStore;

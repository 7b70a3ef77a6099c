// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the interfaces the locale manager talks through.
//! Concrete adapters live in [`crate::infrastructure`].
//!
//! # Available Ports
//!
//! - [`store`]: Persistent key-value preferences
//! - [`platform`]: Applying a locale to the running application
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` so the manager can be shared across threads
//! - Methods are synchronous and return port-specific error types
//! - Both traits are implemented for `Arc<T>` so hosts can keep a handle
//!
//! # Example
//!
//! ```
//! use locale_switch::application::port::{PlatformError, PlatformLocale};
//! use locale_switch::domain::Locale;
//!
//! struct Toolkit;
//!
//! impl PlatformLocale for Toolkit {
//!     fn apply(&self, locale: &Locale) -> Result<(), PlatformError> {
//!         println!("switching UI to {}", locale.tag());
//!         Ok(())
//!     }
//! }
//! ```

pub mod platform;
pub mod store;

pub use platform::{PlatformError, PlatformLocale};
pub use store::{PreferenceStore, StoreError};

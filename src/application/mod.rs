// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports the locale manager depends on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - [`crate::manager`] only sees the traits, never concrete adapters

pub mod port;

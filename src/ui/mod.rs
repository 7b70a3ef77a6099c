// SPDX-License-Identifier: MPL-2.0
//! Toolkit-independent screen models.
//!
//! - [`language_selection`]: Two-phase (select, then confirm) language picker

pub mod language_selection;

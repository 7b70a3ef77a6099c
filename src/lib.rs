// SPDX-License-Identifier: MPL-2.0
//! `locale_switch` switches an application's display language at runtime,
//! persists the choice and publishes it to UI code.
//!
//! The [`manager::LocaleManager`] is the one piece of state: it reads the
//! persisted language once, exposes snapshot reads and change streams, and
//! commits new selections through a [`application::port::PreferenceStore`]
//! and a [`application::port::PlatformLocale`].

#![doc(html_root_url = "https://docs.rs/locale_switch/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod manager;
pub mod paths;
pub mod ui;

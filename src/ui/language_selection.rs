// SPDX-License-Identifier: MPL-2.0
//! Language selection screen model.
//!
//! The screen keeps a pending selection separate from the committed one:
//! picking a row only moves the pending marker, and nothing reaches the
//! [`LocaleManager`] until the user confirms. Cancelling leaves the committed
//! language untouched.
//!
//! Rendering is left to the host toolkit. [`view`] produces a plain
//! description (resource keys, rows, flags) that any widget layer can draw.
//!
//! # Example
//!
//! ```
//! use locale_switch::config::Config;
//! use locale_switch::infrastructure::{MemoryPreferenceStore, NoopPlatform};
//! use locale_switch::manager::LocaleManager;
//! use locale_switch::ui::language_selection::{self, Event, Message, State};
//!
//! let manager = LocaleManager::new(MemoryPreferenceStore::new(), NoopPlatform, Config::default())?;
//! let mut state = State::new(&manager);
//!
//! language_selection::update(&mut state, Message::Select("de".into()), &manager);
//! assert_eq!(manager.current_identifier(), "en");
//!
//! let event = language_selection::update(&mut state, Message::Confirm, &manager);
//! assert!(matches!(event, Event::Committed(ref id) if id == "de"));
//! assert_eq!(manager.current_identifier(), "de");
//! # Ok::<(), locale_switch::error::Error>(())
//! ```

use crate::domain::LanguageEntry;
use crate::error::Error;
use crate::manager::LocaleManager;

/// Resource key for the screen title.
pub const TITLE_KEY: &str = "locale_select_language";

/// Resource key for the confirm button.
pub const SAVE_KEY: &str = "locale_save";

/// Pending selection for an open selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pending: String,
}

impl State {
    /// Opens the screen with the committed language pre-selected.
    pub fn new(manager: &LocaleManager) -> Self {
        Self {
            pending: manager.current_identifier(),
        }
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// True when the pending choice differs from the committed one.
    pub fn is_dirty(&self, manager: &LocaleManager) -> bool {
        !manager.is_selected(&self.pending)
    }
}

/// Messages emitted by the selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A row was tapped.
    Select(String),
    /// The save button was pressed.
    Confirm,
    /// The screen was dismissed without saving.
    Cancel,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// The language was committed; the screen should close.
    Committed(String),
    /// The commit did not fully succeed.
    ///
    /// Check [`Error::is_committed`]: a platform failure still changed the
    /// persisted language.
    CommitFailed(Error),
    /// Dismissed without committing.
    Closed,
}

/// Process a selection screen message and return the corresponding event.
pub fn update(state: &mut State, message: Message, manager: &LocaleManager) -> Event {
    match message {
        Message::Select(identifier) => {
            state.pending = identifier;
            Event::None
        }
        Message::Confirm => match manager.set_locale(&state.pending) {
            Ok(()) => Event::Committed(state.pending.clone()),
            Err(error) => Event::CommitFailed(error),
        },
        Message::Cancel => Event::Closed,
    }
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub entry: LanguageEntry,
    /// Radio button state: matches the pending selection.
    pub is_pending: bool,
    /// Matches the committed language.
    pub is_current: bool,
    /// Draw a divider below this row (every row but the last).
    pub show_divider: bool,
}

/// Everything needed to draw the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub title_key: &'static str,
    pub save_key: &'static str,
    pub rows: Vec<Row>,
}

/// Contextual data needed to render the selection screen.
pub struct ViewContext<'a> {
    pub manager: &'a LocaleManager,
    pub state: &'a State,
}

/// Build the screen description from the current catalog.
pub fn view(ctx: ViewContext<'_>) -> View {
    let catalog = ctx.manager.catalog();
    let current = ctx.manager.current_identifier();
    let last = catalog.len().saturating_sub(1);

    let rows = catalog
        .iter()
        .enumerate()
        .map(|(index, entry)| Row {
            entry: entry.clone(),
            is_pending: entry.identifier() == ctx.state.pending,
            is_current: entry.identifier() == current,
            show_divider: index < last,
        })
        .collect();

    View {
        title_key: TITLE_KEY,
        save_key: SAVE_KEY,
        rows,
    }
}

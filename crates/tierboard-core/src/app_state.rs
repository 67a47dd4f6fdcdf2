//! Application controller state.
//!
//! `AppState` owns everything the presentation layer needs between events:
//! the current board snapshot, the sticky preferences and the visible
//! notice. Every event handler takes the state, swaps in the next board and
//! records what needs persisting; the shell performs the actual saves.

use crate::board::{Board, Position};
use crate::command::{self, Command};
use crate::notice::{Notice, NoticeTimer};
use crate::sync::{self, Clipboard, Export, ImportSource, SyncError};
use std::time::{Duration, Instant};

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Anything other than `light` reads as dark.
    pub fn parse(value: &str) -> Self {
        if value.trim() == "light" { Theme::Light } else { Theme::Dark }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Top-level view tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    BigBoard,
    Position(Position),
}

impl Tab {
    /// All tabs in display order.
    pub fn all() -> Vec<Tab> {
        std::iter::once(Tab::BigBoard)
            .chain(Position::SUPPORTED.into_iter().map(Tab::Position))
            .collect()
    }

    pub fn label(&self) -> &str {
        match self {
            Tab::BigBoard => "Big Board",
            Tab::Position(pos) => pos.as_str(),
        }
    }

    /// Parse a saved tab label; unknown labels are rejected.
    pub fn parse(label: &str) -> Option<Self> {
        Tab::all().into_iter().find(|tab| tab.label() == label.trim())
    }
}

/// Preferences that survive restarts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub active_tab: Tab,
}

/// The controller's state between events.
#[derive(Debug, Clone)]
pub struct AppState {
    board: Board,
    preferences: Preferences,
    notices: NoticeTimer,
    board_dirty: bool,
    preferences_dirty: bool,
}

impl AppState {
    pub fn new(board: Board, preferences: Preferences) -> Self {
        Self {
            board,
            preferences,
            notices: NoticeTimer::default(),
            board_dirty: false,
            preferences_dirty: false,
        }
    }

    /// Override the notice display time.
    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notices = NoticeTimer::new(duration);
        self
    }

    /// The current board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// The visible notice, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.notices.current()
    }

    /// Show a notice from `now`.
    pub fn notify(&mut self, notice: Notice, now: Instant) {
        self.notices.show(notice, now);
    }

    /// Dismiss an expired notice.
    pub fn tick(&mut self, now: Instant) {
        self.notices.tick(now);
    }

    /// Apply a command to the current board. Returns the serialized board
    /// for `Command::Export`.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> Option<Export> {
        let outcome = command::apply(&self.board, command);
        if let Some(notice) = outcome.notice {
            self.notify(notice, now);
        }
        if outcome.changed {
            self.board = outcome.board;
            self.board_dirty = true;
        }
        outcome.export
    }

    /// Import a file whose contents were read by the shell.
    pub fn import_file(&mut self, contents: std::io::Result<String>, now: Instant) {
        match contents {
            Ok(text) => {
                self.dispatch(
                    Command::Import {
                        text,
                        source: ImportSource::File,
                    },
                    now,
                );
            }
            Err(e) => {
                let error = SyncError::Io(e.to_string());
                log::warn!("Import rejected: {}", error);
                self.notify(ImportSource::File.failure_notice(&error), now);
            }
        }
    }

    /// Copy the board JSON to a clipboard.
    pub fn copy_board(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        let copied = match sync::to_clipboard_text(&self.board) {
            Ok(text) => clipboard.write_text(&text),
            Err(e) => {
                log::error!("Copy failed: {}", e);
                false
            }
        };
        let notice = if copied { Notice::CopiedJson } else { Notice::CopyFailed };
        self.notify(notice, now);
    }

    pub fn toggle_theme(&mut self) {
        self.preferences.theme = self.preferences.theme.toggled();
        self.preferences_dirty = true;
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.preferences.active_tab != tab {
            self.preferences.active_tab = tab;
            self.preferences_dirty = true;
        }
    }

    /// Whether the board changed since the last call, clearing the flag.
    pub fn take_board_dirty(&mut self) -> bool {
        std::mem::take(&mut self.board_dirty)
    }

    /// Whether the preferences changed since the last call, clearing the flag.
    pub fn take_preferences_dirty(&mut self) -> bool {
        std::mem::take(&mut self.preferences_dirty)
    }
}

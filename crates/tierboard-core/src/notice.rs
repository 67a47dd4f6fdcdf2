//! Short status notices and their auto-dismiss timer.

use std::fmt;
use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2200);

/// A user-visible status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    TierAdded,
    TierDeleted,
    NeedOneTier,
    PlayerAdded,
    PlayerRemoved,
    ExportedJson,
    ImportedJson,
    PastedJson,
    InvalidJson,
    ImportFailed,
    CopiedJson,
    CopyFailed,
    ResetBoard,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::TierAdded => "Tier Added",
            Notice::TierDeleted => "Tier Deleted",
            Notice::NeedOneTier => "Need at Least One Tier",
            Notice::PlayerAdded => "Player Added",
            Notice::PlayerRemoved => "Player Removed",
            Notice::ExportedJson => "Exported JSON",
            Notice::ImportedJson => "Imported JSON",
            Notice::PastedJson => "Pasted JSON Board",
            Notice::InvalidJson => "Invalid JSON",
            Notice::ImportFailed => "Import Failed",
            Notice::CopiedJson => "Copied JSON Board",
            Notice::CopyFailed => "Copy Failed",
            Notice::ResetBoard => "Reset Board",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Holds the visible notice. Showing a new notice restarts the timer.
#[derive(Debug, Clone)]
pub struct NoticeTimer {
    current: Option<(Notice, Instant)>,
    duration: Duration,
}

impl Default for NoticeTimer {
    fn default() -> Self {
        Self::new(NOTICE_DURATION)
    }
}

impl NoticeTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Show a notice from `now`.
    pub fn show(&mut self, notice: Notice, now: Instant) {
        self.current = Some((notice, now));
    }

    /// Drop the notice once its time is up. Returns true if it was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.current {
            Some((_, shown_at)) if now.saturating_duration_since(shown_at) >= self.duration => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// The visible notice, if any.
    pub fn current(&self) -> Option<Notice> {
        self.current.map(|(notice, _)| notice)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

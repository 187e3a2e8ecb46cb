/// Run-state definitions for crawler records
use crate::fleet::CrawlerInstance;
use std::fmt;

/// Lifecycle position of a crawler, derived from its reported flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Crawler is working through its page range (`pause = false`)
    Running,

    /// Paused, output not yet packaged (`pause = true, send_file = false`)
    PausedPending,

    /// Paused and already archived (`pause = true, send_file = true`)
    PausedArchived,
}

impl RunState {
    /// Derives the state from a record's pause and send-file flags
    ///
    /// A running crawler that already reports `send_file = true` is still
    /// `Running`; the flag only gates archiving once paused.
    pub fn of(crawler: &CrawlerInstance) -> Self {
        match (crawler.pause, crawler.send_file) {
            (false, _) => Self::Running,
            (true, false) => Self::PausedPending,
            (true, true) => Self::PausedArchived,
        }
    }

    pub fn is_paused(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Returns true if the archive action may be offered
    ///
    /// Only a paused crawler that has not produced an archive yet qualifies.
    pub fn can_archive(&self) -> bool {
        matches!(self, Self::PausedPending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::PausedPending => "paused",
            Self::PausedArchived => "archived",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The pause/resume control shown for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAffordance {
    /// Record is paused; the control resumes it
    Resume,
    /// Record is running; the control pauses it
    Pause,
}

impl PauseAffordance {
    pub fn of(crawler: &CrawlerInstance) -> Self {
        if RunState::of(crawler).is_paused() {
            Self::Resume
        } else {
            Self::Pause
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Pause => "Pause",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Resume => "▶",
            Self::Pause => "⏸",
        }
    }
}

/// How the day's start time is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// Start follows the first launch of the day
    Flexible,
    /// Start is pinned to the configured clock time (09:00 by default)
    Fixed,
}

impl StartMode {
    pub fn from_flexible(flexible: bool) -> Self {
        if flexible {
            Self::Flexible
        } else {
            Self::Fixed
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flexible => "flexible",
            Self::Fixed => "fixed",
        }
    }
}

/// The day-based reminders derived from the resolved start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineKind {
    /// End of the workday (clock out)
    Main,
    /// Earlier warning to write the work log
    Interim,
}

impl DeadlineKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Main => "Clock out",
            Self::Interim => "Work log",
        }
    }
}

/// Single-shot lifecycle of a deadline within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineState {
    Pending,
    Fired,
    Acknowledged,
}

/// Emitted by the engine the one time a countdown crosses zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    Deadline(DeadlineKind),
    CustomFinished,
}

/// UI mode for the interactive view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// An alert is waiting to be acknowledged
    Alert,
    /// Typing the minutes for a custom countdown
    EnteringMinutes,
    /// Shown when midnight has passed, forces restart
    DayChanged,
}

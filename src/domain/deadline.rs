use super::enums::{DeadlineKind, DeadlineState};
use chrono::{Duration, NaiveDateTime};

/// Offsets from the resolved start to each reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    pub main_offset: Duration,
    pub interim_offset: Duration,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            main_offset: Duration::minutes(8 * 60 + 30),
            interim_offset: Duration::minutes(7 * 60 + 30),
        }
    }
}

impl From<&crate::persistence::Settings> for DeadlinePolicy {
    fn from(settings: &crate::persistence::Settings) -> Self {
        Self {
            main_offset: settings.main_offset(),
            interim_offset: settings.interim_offset(),
        }
    }
}

/// Deadline instants for one workday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub main: NaiveDateTime,
    pub interim: NaiveDateTime,
}

impl Deadlines {
    /// Offsets past the end of the calendar saturate instead of overflowing
    pub fn compute(resolved_start: NaiveDateTime, policy: &DeadlinePolicy) -> Self {
        let offset = |by: Duration| {
            resolved_start
                .checked_add_signed(by)
                .unwrap_or(NaiveDateTime::MAX)
        };
        Self {
            main: offset(policy.main_offset),
            interim: offset(policy.interim_offset),
        }
    }
}

/// Signed time left until `deadline`; negative once it has passed
pub fn remaining(deadline: NaiveDateTime, now: NaiveDateTime) -> Duration {
    deadline - now
}

/// Format a signed duration as "H:MM:SS", prefixed with "-" when overdue
pub fn format_remaining(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{}{}:{:02}:{:02}", sign, hours, minutes, seconds)
}

/// A deadline plus its fire-once state.
///
/// Firing is tracked explicitly so repeated polls after the zero crossing
/// never fire again.
#[derive(Debug, Clone)]
pub struct TrackedDeadline {
    pub kind: DeadlineKind,
    pub at: NaiveDateTime,
    pub state: DeadlineState,
}

impl TrackedDeadline {
    pub fn new(kind: DeadlineKind, at: NaiveDateTime) -> Self {
        Self {
            kind,
            at,
            state: DeadlineState::Pending,
        }
    }

    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        remaining(self.at, now)
    }

    /// Returns true exactly once: the first check at or after the deadline
    pub fn check(&mut self, now: NaiveDateTime) -> bool {
        if self.state == DeadlineState::Pending && self.remaining(now) <= Duration::zero() {
            self.state = DeadlineState::Fired;
            return true;
        }
        false
    }

    /// Fired -> Acknowledged; no effect in any other state
    pub fn acknowledge(&mut self) -> bool {
        if self.state == DeadlineState::Fired {
            self.state = DeadlineState::Acknowledged;
            return true;
        }
        false
    }
}

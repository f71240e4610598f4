//! Day boundary resolution.
//!
//! Decides whether this launch is the first of the calendar day and turns the
//! recorded start into the canonical start instant the deadlines hang off.

use crate::domain::StartMode;
use crate::persistence::{Settings, StartTimeStore};
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use tracing::{error, info, warn};

/// Outcome of resolving the workday start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Canonical start: lead-in applied (or fixed time), floored to the minute
    pub resolved_start: NaiveDateTime,
    /// True when this launch recorded today's first start
    pub is_first_start_today: bool,
    /// The recorded (or current) instant before any adjustment
    pub raw_start: NaiveDateTime,
    pub mode: StartMode,
}

/// Drop seconds and sub-second precision
pub fn floor_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Resolves the day start against the start-time store.
///
/// Mode and tunables are captured at construction, so a mode change made
/// while the session runs never shifts an already resolved start.
#[derive(Debug, Clone)]
pub struct DayResolver {
    store: StartTimeStore,
    mode: StartMode,
    lead_in: Duration,
    fixed_start: NaiveTime,
}

impl DayResolver {
    pub fn new(store: StartTimeStore, mode: StartMode, settings: &Settings) -> Self {
        Self {
            store,
            mode,
            lead_in: settings.lead_in(),
            fixed_start: settings.fixed_start_time(),
        }
    }

    pub fn resolve(&self, now: NaiveDateTime) -> Resolution {
        let last = self.store.read_last();

        let (raw_start, is_first_start_today) = match last {
            Some(recorded) if recorded.date() == now.date() => (recorded, false),
            other => {
                if let Some(recorded) = other.filter(|recorded| *recorded > now) {
                    warn!(last = %recorded, now = %now, "clock is behind the last recorded start");
                }
                info!(now = %now, "first start of the day");
                if let Err(e) = self.store.append(now) {
                    // Keep going with the in-memory start
                    error!(path = %self.store.path().display(), error = %e, "failed to record start time");
                }
                (now, true)
            }
        };

        let shifted = match self.mode {
            StartMode::Flexible => raw_start
                .checked_sub_signed(self.lead_in)
                .unwrap_or(raw_start),
            StartMode::Fixed => now.date().and_time(self.fixed_start),
        };
        let resolved_start = floor_to_minute(shifted);

        info!(
            raw_start = %raw_start,
            resolved_start = %resolved_start,
            mode = self.mode.name(),
            is_first_start_today,
            "resolved workday start"
        );

        Resolution {
            resolved_start,
            is_first_start_today,
            raw_start,
            mode: self.mode,
        }
    }
}

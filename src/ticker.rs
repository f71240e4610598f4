use chrono::{Local, NaiveDateTime};
use std::time::Duration;

/// Default poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 100;

/// Get tick duration, never zero
pub fn tick_duration(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.max(1))
}

/// Local wall-clock time, the clock every countdown is sampled against
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

use super::enums::DeadlineState;
use crate::error::DurationInputError;
use chrono::{Duration, NaiveDateTime};
use std::num::NonZeroU32;

/// Longest custom countdown accepted from the user
pub const MAX_CUSTOM_MINUTES: u32 = 480;

/// Minutes pre-filled in the custom countdown prompt
pub const DEFAULT_CUSTOM_MINUTES: u32 = 5;

/// Validate user input for a custom countdown
pub fn parse_custom_minutes(input: &str) -> Result<NonZeroU32, DurationInputError> {
    let trimmed = input.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| DurationInputError::NotANumber(trimmed.to_string()))?;

    if minutes <= 0 {
        return Err(DurationInputError::NotPositive);
    }
    if minutes > i64::from(MAX_CUSTOM_MINUTES) {
        return Err(DurationInputError::TooLong {
            minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
            max: MAX_CUSTOM_MINUTES,
        });
    }

    u32::try_from(minutes)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(DurationInputError::NotPositive)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running { ends_at: NaiveDateTime },
    Paused { remaining: Duration },
}

/// User-started ad-hoc countdown, independent of the workday deadlines
#[derive(Debug, Clone)]
pub struct CustomCountdown {
    duration: Duration,
    phase: Phase,
    state: DeadlineState,
}

impl CustomCountdown {
    pub fn start(now: NaiveDateTime, minutes: NonZeroU32) -> Self {
        let duration = Duration::minutes(i64::from(minutes.get()));
        Self {
            duration,
            phase: Phase::Running {
                ends_at: now + duration,
            },
            state: DeadlineState::Pending,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> DeadlineState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    /// Time left; frozen while paused, negative once overdue
    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        match self.phase {
            Phase::Running { ends_at } => ends_at - now,
            Phase::Paused { remaining } => remaining,
        }
    }

    /// Freeze the remaining time. Only a pending, running countdown pauses.
    pub fn pause(&mut self, now: NaiveDateTime) -> bool {
        match self.phase {
            Phase::Running { ends_at } if self.state == DeadlineState::Pending => {
                self.phase = Phase::Paused {
                    remaining: ends_at - now,
                };
                true
            }
            _ => false,
        }
    }

    /// Continue with exactly the remaining time captured at pause
    pub fn resume(&mut self, now: NaiveDateTime) -> bool {
        match self.phase {
            Phase::Paused { remaining } => {
                self.phase = Phase::Running {
                    ends_at: now + remaining,
                };
                true
            }
            Phase::Running { .. } => false,
        }
    }

    /// Returns true exactly once, when a running countdown reaches zero
    pub fn check(&mut self, now: NaiveDateTime) -> bool {
        if self.state == DeadlineState::Pending
            && !self.is_paused()
            && self.remaining(now) <= Duration::zero()
        {
            self.state = DeadlineState::Fired;
            return true;
        }
        false
    }

    pub fn acknowledge(&mut self) -> bool {
        if self.state == DeadlineState::Fired {
            self.state = DeadlineState::Acknowledged;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn minutes(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_parse_custom_minutes() {
        assert_eq!(parse_custom_minutes("30"), Ok(minutes(30)));
        assert_eq!(parse_custom_minutes(" 1 "), Ok(minutes(1)));
        assert_eq!(parse_custom_minutes("480"), Ok(minutes(480)));
    }

    #[test]
    fn test_parse_custom_minutes_rejects_bad_input() {
        assert_eq!(parse_custom_minutes("0"), Err(DurationInputError::NotPositive));
        assert_eq!(parse_custom_minutes("-5"), Err(DurationInputError::NotPositive));
        assert_eq!(
            parse_custom_minutes("ten"),
            Err(DurationInputError::NotANumber("ten".to_string()))
        );
        assert_eq!(
            parse_custom_minutes(""),
            Err(DurationInputError::NotANumber(String::new()))
        );
        assert_eq!(
            parse_custom_minutes("481"),
            Err(DurationInputError::TooLong { minutes: 481, max: 480 })
        );
    }

    #[test]
    fn test_countdown_fires_once() {
        let mut countdown = CustomCountdown::start(at(10, 0, 0), minutes(5));
        assert_eq!(countdown.duration(), Duration::minutes(5));
        assert_eq!(countdown.remaining(at(10, 1, 0)), Duration::minutes(4));

        assert!(!countdown.check(at(10, 4, 59)));
        assert!(countdown.check(at(10, 5, 0)));
        assert!(!countdown.check(at(10, 5, 1)));
        assert_eq!(countdown.state(), DeadlineState::Fired);
        assert!(countdown.acknowledge());
        assert_eq!(countdown.state(), DeadlineState::Acknowledged);
    }

    #[test]
    fn test_pause_preserves_exact_remaining() {
        let mut countdown = CustomCountdown::start(at(10, 0, 0), minutes(10));

        assert!(countdown.pause(at(10, 3, 20)));
        assert!(countdown.is_paused());
        assert!(!countdown.pause(at(10, 3, 30)));

        // Long pause: nothing moves, nothing fires
        assert_eq!(countdown.remaining(at(12, 0, 0)), Duration::seconds(6 * 60 + 40));
        assert!(!countdown.check(at(12, 0, 0)));

        assert!(countdown.resume(at(12, 0, 0)));
        assert!(!countdown.resume(at(12, 0, 1)));
        assert_eq!(countdown.remaining(at(12, 0, 0)), Duration::seconds(6 * 60 + 40));
        assert!(countdown.check(at(12, 6, 40)));
    }

    #[test]
    fn test_cannot_pause_after_firing() {
        let mut countdown = CustomCountdown::start(at(10, 0, 0), minutes(1));
        assert!(countdown.check(at(10, 1, 0)));
        assert!(!countdown.pause(at(10, 1, 5)));
    }
}

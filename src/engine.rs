//! Countdown engine.
//!
//! Poll-driven: the caller samples it with the current time on every tick.
//! There are no threads or timers inside; each deadline fires on the first
//! poll that observes it at or past zero, and never again in the session.

use crate::domain::{Alert, CustomCountdown, DeadlineKind, Deadlines, TrackedDeadline};
use chrono::{Duration, NaiveDateTime};
use std::num::NonZeroU32;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct CountdownEngine {
    main: TrackedDeadline,
    interim: TrackedDeadline,
    custom: Option<CustomCountdown>,
}

impl CountdownEngine {
    pub fn new(deadlines: Deadlines) -> Self {
        Self {
            main: TrackedDeadline::new(DeadlineKind::Main, deadlines.main),
            interim: TrackedDeadline::new(DeadlineKind::Interim, deadlines.interim),
            custom: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn deadlines(&self) -> Deadlines {
        Deadlines {
            main: self.main.at,
            interim: self.interim.at,
        }
    }

    pub fn deadline(&self, kind: DeadlineKind) -> &TrackedDeadline {
        match kind {
            DeadlineKind::Main => &self.main,
            DeadlineKind::Interim => &self.interim,
        }
    }

    fn deadline_mut(&mut self, kind: DeadlineKind) -> &mut TrackedDeadline {
        match kind {
            DeadlineKind::Main => &mut self.main,
            DeadlineKind::Interim => &mut self.interim,
        }
    }

    pub fn remaining_main(&self, now: NaiveDateTime) -> Duration {
        self.main.remaining(now)
    }

    pub fn remaining_interim(&self, now: NaiveDateTime) -> Duration {
        self.interim.remaining(now)
    }

    pub fn custom(&self) -> Option<&CustomCountdown> {
        self.custom.as_ref()
    }

    /// Time left on the custom countdown, `None` when none is active
    pub fn remaining_custom(&self, now: NaiveDateTime) -> Option<Duration> {
        self.custom.as_ref().map(|c| c.remaining(now))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a custom countdown, discarding any previous one
    pub fn start_custom(&mut self, now: NaiveDateTime, minutes: NonZeroU32) {
        if self.custom.is_some() {
            debug!("replacing existing custom countdown");
        }
        self.custom = Some(CustomCountdown::start(now, minutes));
        info!(minutes = minutes.get(), "custom countdown started");
    }

    /// Pause a running custom countdown or resume a paused one.
    ///
    /// Returns the new paused state, or `None` if nothing changed.
    pub fn toggle_pause_custom(&mut self, now: NaiveDateTime) -> Option<bool> {
        let custom = self.custom.as_mut()?;
        if custom.is_paused() {
            custom.resume(now).then_some(false)
        } else {
            custom.pause(now).then_some(true)
        }
    }

    /// Cancel the custom countdown, returning whether one was active
    pub fn reset_custom(&mut self) -> bool {
        let had_custom = self.custom.take().is_some();
        if had_custom {
            info!("custom countdown reset");
        }
        had_custom
    }

    /// Check every countdown against `now` and return newly fired alerts
    pub fn poll(&mut self, now: NaiveDateTime) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for kind in [DeadlineKind::Interim, DeadlineKind::Main] {
            if self.deadline_mut(kind).check(now) {
                info!(deadline = kind.label(), at = %self.deadline(kind).at, "deadline reached");
                alerts.push(Alert::Deadline(kind));
            }
        }

        if let Some(custom) = self.custom.as_mut() {
            if custom.check(now) {
                info!("custom countdown finished");
                alerts.push(Alert::CustomFinished);
            }
        }

        alerts
    }

    /// Mark a fired alert as seen. An acknowledged custom countdown is cleared.
    pub fn acknowledge(&mut self, alert: Alert) -> bool {
        match alert {
            Alert::Deadline(kind) => self.deadline_mut(kind).acknowledge(),
            Alert::CustomFinished => {
                let acknowledged = self
                    .custom
                    .as_mut()
                    .map(|c| c.acknowledge())
                    .unwrap_or(false);
                if acknowledged {
                    self.custom = None;
                }
                acknowledged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeadlinePolicy, DeadlineState};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn minutes(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn engine() -> CountdownEngine {
        CountdownEngine::new(Deadlines::compute(at(9, 0, 0), &DeadlinePolicy::default()))
    }

    #[test]
    fn test_remaining_queries() {
        let engine = engine();
        assert_eq!(engine.remaining_main(at(17, 0, 0)), Duration::minutes(30));
        assert_eq!(engine.remaining_interim(at(17, 0, 0)), Duration::minutes(-30));
        assert_eq!(engine.remaining_main(at(9, 0, 0)), Duration::minutes(510));
        assert_eq!(engine.remaining_custom(at(9, 0, 0)), None);
    }

    #[test]
    fn test_poll_fires_each_deadline_once() {
        let mut engine = engine();

        assert!(engine.poll(at(16, 29, 59)).is_empty());
        assert_eq!(
            engine.poll(at(16, 30, 0)),
            vec![Alert::Deadline(DeadlineKind::Interim)]
        );

        // Sampled every 100ms for an hour: nothing new until the main deadline
        let mut now = at(16, 30, 0);
        let mut fired = Vec::new();
        while now < at(17, 30, 30) {
            now += Duration::milliseconds(100);
            fired.extend(engine.poll(now));
        }
        assert_eq!(fired, vec![Alert::Deadline(DeadlineKind::Main)]);
        assert_eq!(engine.deadline(DeadlineKind::Main).state, DeadlineState::Fired);
    }

    #[test]
    fn test_late_launch_fires_passed_deadlines_on_first_poll() {
        let mut engine = engine();
        assert_eq!(
            engine.poll(at(18, 0, 0)),
            vec![
                Alert::Deadline(DeadlineKind::Interim),
                Alert::Deadline(DeadlineKind::Main)
            ]
        );
        assert!(engine.poll(at(18, 0, 1)).is_empty());
    }

    #[test]
    fn test_acknowledge_does_not_refire() {
        let mut engine = engine();
        engine.poll(at(17, 30, 0));

        assert!(engine.acknowledge(Alert::Deadline(DeadlineKind::Main)));
        assert!(!engine.acknowledge(Alert::Deadline(DeadlineKind::Main)));
        assert_eq!(engine.deadline(DeadlineKind::Main).state, DeadlineState::Acknowledged);
        assert!(engine.poll(at(20, 0, 0)).is_empty());
        assert!(engine.remaining_main(at(20, 0, 0)) < Duration::zero());
    }

    #[test]
    fn test_restarting_custom_discards_previous() {
        let mut engine = engine();
        engine.start_custom(at(10, 0, 0), minutes(5));
        engine.start_custom(at(10, 2, 0), minutes(10));

        // The first countdown would have ended at 10:05
        assert!(engine.poll(at(10, 5, 0)).is_empty());
        assert_eq!(engine.remaining_custom(at(10, 5, 0)), Some(Duration::minutes(7)));

        assert_eq!(engine.poll(at(10, 12, 0)), vec![Alert::CustomFinished]);
        assert!(engine.poll(at(10, 12, 1)).is_empty());
    }

    #[test]
    fn test_acknowledged_custom_becomes_inactive() {
        let mut engine = engine();
        engine.start_custom(at(10, 0, 0), minutes(1));
        engine.poll(at(10, 1, 0));

        assert_eq!(engine.remaining_custom(at(10, 1, 30)), Some(Duration::seconds(-30)));
        assert!(engine.acknowledge(Alert::CustomFinished));
        assert_eq!(engine.remaining_custom(at(10, 1, 30)), None);
        assert!(!engine.acknowledge(Alert::CustomFinished));
    }

    #[test]
    fn test_pause_and_reset_custom() {
        let mut engine = engine();
        assert_eq!(engine.toggle_pause_custom(at(10, 0, 0)), None);

        engine.start_custom(at(10, 0, 0), minutes(2));
        assert_eq!(engine.toggle_pause_custom(at(10, 0, 30)), Some(true));
        assert!(engine.poll(at(11, 0, 0)).is_empty());
        assert_eq!(engine.toggle_pause_custom(at(11, 0, 0)), Some(false));
        assert_eq!(engine.remaining_custom(at(11, 0, 0)), Some(Duration::seconds(90)));

        assert!(engine.reset_custom());
        assert!(!engine.reset_custom());
        assert_eq!(engine.remaining_custom(at(11, 0, 0)), None);
        assert!(engine.poll(at(12, 0, 0)).iter().all(|a| *a != Alert::CustomFinished));
    }
}

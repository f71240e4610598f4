use crate::domain::{parse_custom_minutes, Alert, DeadlineKind, StartMode, UiMode, DEFAULT_CUSTOM_MINUTES};
use crate::notifications;
use crate::session::Session;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::VecDeque;
use tracing::{error, warn};

/// Something the user has to see and dismiss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// First launch of the day
    ClockIn,
    Alert(Alert),
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self {
            Prompt::ClockIn => "Clock In",
            Prompt::Alert(Alert::Deadline(DeadlineKind::Interim)) => "Work Record Reminder",
            Prompt::Alert(Alert::Deadline(DeadlineKind::Main)) => "Workday Over",
            Prompt::Alert(Alert::CustomFinished) => "Countdown Reminder",
        }
    }

    /// Body text; the clock-out reminder depends on the session's mode
    pub fn message(&self, mode: StartMode) -> &'static str {
        match self {
            Prompt::ClockIn => "First start of the day. Remember to clock in.",
            Prompt::Alert(Alert::Deadline(DeadlineKind::Interim)) => {
                "Time to write your work log."
            }
            Prompt::Alert(Alert::Deadline(DeadlineKind::Main)) => match mode {
                StartMode::Flexible => {
                    "1. Clock out\n2. Turn off AC, water dispenser, windows, computer\n3. Write work log"
                }
                StartMode::Fixed => "Need to shut down.",
            },
            Prompt::Alert(Alert::CustomFinished) => "Custom countdown finished!",
        }
    }
}

/// Interactive application state wrapped around one session
pub struct AppState {
    pub session: Session,
    pub ui_mode: UiMode,
    /// Fired prompts, oldest first, waiting to be dismissed
    pub prompts: VecDeque<Prompt>,
    pub minutes_input: String,
    pub input_error: Option<String>,
    pub status_message: Option<String>,
    pub file_date: NaiveDate, // Day the session was resolved for
}

impl AppState {
    pub fn new(session: Session, now: NaiveDateTime) -> Self {
        let is_first_start = session.resolution().is_first_start_today;
        let mut app = Self {
            session,
            ui_mode: UiMode::Normal,
            prompts: VecDeque::new(),
            minutes_input: String::new(),
            input_error: None,
            status_message: None,
            file_date: now.date(),
        };

        if is_first_start {
            app.raise(Prompt::ClockIn);
        }
        app.ui_mode = app.resting_mode();
        app
    }

    fn raise(&mut self, prompt: Prompt) {
        notifications::notify(prompt.title(), prompt.message(self.session.mode()));
        self.prompts.push_back(prompt);
    }

    /// Mode to fall back to when no input is in progress
    fn resting_mode(&self) -> UiMode {
        if self.prompts.is_empty() {
            UiMode::Normal
        } else {
            UiMode::Alert
        }
    }

    pub fn current_prompt(&self) -> Option<Prompt> {
        self.prompts.front().copied()
    }

    /// Check if the date has changed (crossed midnight) since launch
    pub fn has_day_changed(&self, now: NaiveDateTime) -> bool {
        now.date() != self.file_date
    }

    /// Poll the engine and queue any alerts that fired
    pub fn tick(&mut self, now: NaiveDateTime) {
        if self.ui_mode == UiMode::DayChanged {
            return;
        }
        if self.has_day_changed(now) {
            warn!(session_date = %self.file_date, "date changed, restart required");
            self.ui_mode = UiMode::DayChanged;
            return;
        }

        let alerts = self.session.engine_mut().poll(now);
        for alert in alerts {
            self.raise(Prompt::Alert(alert));
        }

        if self.ui_mode == UiMode::Normal {
            self.ui_mode = self.resting_mode();
        }
    }

    /// Dismiss the oldest prompt
    pub fn acknowledge_prompt(&mut self) {
        if let Some(Prompt::Alert(alert)) = self.prompts.pop_front() {
            self.session.engine_mut().acknowledge(alert);
        }
        self.ui_mode = self.resting_mode();
    }

    pub fn start_custom_input(&mut self) {
        self.minutes_input = DEFAULT_CUSTOM_MINUTES.to_string();
        self.input_error = None;
        self.ui_mode = UiMode::EnteringMinutes;
    }

    pub fn input_add_char(&mut self, c: char) {
        if c.is_ascii_digit() && self.minutes_input.len() < 4 {
            self.minutes_input.push(c);
            self.input_error = None;
        }
    }

    pub fn input_backspace(&mut self) {
        self.minutes_input.pop();
        self.input_error = None;
    }

    /// Nudge the entered minutes up or down, never below one
    pub fn input_adjust(&mut self, delta: i64) {
        let current: i64 = self.minutes_input.trim().parse().unwrap_or(0);
        self.minutes_input = (current + delta).max(1).to_string();
        self.input_error = None;
    }

    /// Validate the entered minutes and start the countdown.
    ///
    /// Invalid input keeps the form open with an error.
    pub fn submit_custom_input(&mut self, now: NaiveDateTime) {
        match parse_custom_minutes(&self.minutes_input) {
            Ok(minutes) => {
                self.session.engine_mut().start_custom(now, minutes);
                self.status_message = Some(format!("Custom countdown: {} min", minutes));
                self.minutes_input.clear();
                self.ui_mode = self.resting_mode();
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
            }
        }
    }

    pub fn cancel_custom_input(&mut self) {
        self.minutes_input.clear();
        self.input_error = None;
        self.ui_mode = self.resting_mode();
    }

    pub fn toggle_pause_custom(&mut self, now: NaiveDateTime) {
        self.status_message = match self.session.engine_mut().toggle_pause_custom(now) {
            Some(true) => Some("Custom countdown paused".to_string()),
            Some(false) => Some("Custom countdown resumed".to_string()),
            None => Some("No custom countdown running".to_string()),
        };
    }

    pub fn reset_custom(&mut self) {
        if self.session.engine_mut().reset_custom() {
            self.status_message = Some("Custom countdown reset".to_string());
        }
    }

    /// Flip the persisted start mode; the new mode applies after restart
    pub fn toggle_mode(&mut self) {
        match self.session.toggle_mode() {
            Ok(mode) if mode != self.session.mode() => {
                self.status_message = Some(format!(
                    "Start mode set to {}. Restart to apply.",
                    mode.name()
                ));
            }
            Ok(mode) => {
                self.status_message = Some(format!("Start mode set to {}.", mode.name()));
            }
            Err(e) => {
                error!(error = %e, "failed to save start mode");
                self.status_message = Some(format!("Could not save start mode: {}", e));
            }
        }
    }
}

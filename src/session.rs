use crate::config::Config;
use crate::domain::{Deadlines, StartMode};
use crate::engine::CountdownEngine;
use crate::persistence::ModeStore;
use crate::resolver::Resolution;
use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

/// One launch of the app: the start resolved at launch plus the countdowns
/// derived from it. Nothing here is recomputed for the rest of the session.
#[derive(Debug)]
pub struct Session {
    resolution: Resolution,
    engine: CountdownEngine,
    mode_store: ModeStore,
    /// Mode persisted during this session; applies from the next launch
    saved_mode: Option<StartMode>,
}

impl Session {
    pub fn start(config: &Config, now: NaiveDateTime) -> Self {
        let mode_store = config.mode_store();
        let mode = mode_store.load();
        let resolution = config.resolver(mode).resolve(now);
        let deadlines = Deadlines::compute(resolution.resolved_start, &config.deadline_policy());

        info!(
            main = %deadlines.main,
            interim = %deadlines.interim,
            "session deadlines set"
        );

        Self {
            resolution,
            engine: CountdownEngine::new(deadlines),
            mode_store,
            saved_mode: None,
        }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Mode the current deadlines were resolved with
    pub fn mode(&self) -> StartMode {
        self.resolution.mode
    }

    pub fn deadlines(&self) -> Deadlines {
        self.engine.deadlines()
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CountdownEngine {
        &mut self.engine
    }

    /// A persisted mode that differs from the running one, pending restart
    pub fn mode_after_restart(&self) -> Option<StartMode> {
        self.saved_mode.filter(|mode| *mode != self.mode())
    }

    /// Flip and persist the start mode.
    ///
    /// The resolved start of this session is left untouched.
    pub fn toggle_mode(&mut self) -> Result<StartMode> {
        let next = self.mode_store.toggle()?;
        self.saved_mode = Some(next);
        info!(mode = next.name(), "start mode toggled, applies after restart");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Settings;
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn config(dir: &tempfile::TempDir) -> Config {
        Config::with_settings(dir.path(), Settings::default())
    }

    #[test]
    fn test_session_start_flexible() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::start(&config(&dir), at(9, 1, 32));

        assert!(session.resolution().is_first_start_today);
        assert_eq!(session.mode(), StartMode::Flexible);
        assert_eq!(session.resolution().resolved_start, at(9, 0, 0));
        assert_eq!(session.deadlines().main, at(17, 30, 0));
        assert_eq!(session.deadlines().interim, at(16, 30, 0));
        assert_eq!(session.engine().remaining_main(at(17, 0, 0)), Duration::minutes(30));
    }

    #[test]
    fn test_relaunch_restores_deadlines() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        let first = Session::start(&config, at(8, 47, 10));
        let relaunch = Session::start(&config, at(14, 3, 0));

        assert!(!relaunch.resolution().is_first_start_today);
        assert_eq!(relaunch.deadlines(), first.deadlines());
    }

    #[test]
    fn test_out_of_range_settings_keep_default_deadlines() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::SETTINGS_FILE),
            r#"{ "main_offset_mins": 9000000000000, "lead_in_secs": 9223372036854775807 }"#,
        )
        .unwrap();

        let session = Session::start(&Config::load(dir.path()), at(9, 1, 32));
        assert_eq!(session.resolution().resolved_start, at(9, 0, 0));
        assert_eq!(session.deadlines().main, at(17, 30, 0));
        assert_eq!(session.deadlines().interim, at(16, 30, 0));
    }

    #[test]
    fn test_session_reads_fixed_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        config.mode_store().set_flexible(false).unwrap();

        let session = Session::start(&config, at(10, 20, 0));
        assert_eq!(session.mode(), StartMode::Fixed);
        assert_eq!(session.deadlines().main, at(17, 30, 0));
    }

    #[test]
    fn test_toggle_mode_does_not_move_deadlines() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let mut session = Session::start(&config, at(10, 20, 0));
        let before = session.deadlines();

        assert_eq!(session.toggle_mode().unwrap(), StartMode::Fixed);
        assert_eq!(session.mode(), StartMode::Flexible);
        assert_eq!(session.mode_after_restart(), Some(StartMode::Fixed));
        assert_eq!(session.deadlines(), before);

        // Toggling back leaves nothing pending
        assert_eq!(session.toggle_mode().unwrap(), StartMode::Flexible);
        assert_eq!(session.mode_after_restart(), None);

        // The persisted value is what the next launch sees
        session.toggle_mode().unwrap();
        let next = Session::start(&config, at(11, 0, 0));
        assert_eq!(next.mode(), StartMode::Fixed);
        assert_eq!(next.deadlines().main, at(17, 30, 0));
    }
}

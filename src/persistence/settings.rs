use anyhow::{Context, Result};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::warn;

const DEFAULT_FIXED_START: &str = "09:00";
const DEFAULT_LEAD_IN_SECS: i64 = 92;
const DEFAULT_MAIN_OFFSET_MINS: i64 = 8 * 60 + 30;
const DEFAULT_INTERIM_OFFSET_MINS: i64 = 7 * 60 + 30;

/// Accepted lead-in, at most one hour either way
const LEAD_IN_RANGE: RangeInclusive<i64> = -3600..=3600;
/// Accepted deadline offsets, within one day of the start
const OFFSET_RANGE: RangeInclusive<i64> = 0..=24 * 60;

/// Tunables stored in settings.json. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Subtracted from the raw start before flooring to the minute
    pub lead_in_secs: i64,
    /// Clock time used as the start in fixed mode ("HH:MM" or "HH:MM:SS")
    pub fixed_start: String,
    pub main_offset_mins: i64,
    pub interim_offset_mins: i64,
    /// Poll interval of the interactive view
    pub tick_ms: u64,

    // File names inside the data directory
    pub start_time_file: String,
    pub mode_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lead_in_secs: DEFAULT_LEAD_IN_SECS,
            fixed_start: DEFAULT_FIXED_START.to_string(),
            main_offset_mins: DEFAULT_MAIN_OFFSET_MINS,
            interim_offset_mins: DEFAULT_INTERIM_OFFSET_MINS,
            tick_ms: crate::ticker::DEFAULT_TICK_MS,
            start_time_file: "start_time.txt".to_string(),
            mode_file: "flexible_mode.txt".to_string(),
        }
    }
}

fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// `value` if it lies in `range`, otherwise `default` with a warning
fn bounded(name: &str, value: i64, range: RangeInclusive<i64>, default: i64) -> i64 {
    if range.contains(&value) {
        value
    } else {
        warn!(
            setting = name,
            value,
            min = *range.start(),
            max = *range.end(),
            "setting out of range, using default {}",
            default
        );
        default
    }
}

impl Settings {
    /// Lead-in; out-of-range values fall back to 92 seconds
    pub fn lead_in(&self) -> Duration {
        Duration::seconds(bounded(
            "lead_in_secs",
            self.lead_in_secs,
            LEAD_IN_RANGE,
            DEFAULT_LEAD_IN_SECS,
        ))
    }

    pub fn main_offset(&self) -> Duration {
        Duration::minutes(bounded(
            "main_offset_mins",
            self.main_offset_mins,
            OFFSET_RANGE,
            DEFAULT_MAIN_OFFSET_MINS,
        ))
    }

    pub fn interim_offset(&self) -> Duration {
        Duration::minutes(bounded(
            "interim_offset_mins",
            self.interim_offset_mins,
            OFFSET_RANGE,
            DEFAULT_INTERIM_OFFSET_MINS,
        ))
    }

    pub fn tick(&self) -> std::time::Duration {
        crate::ticker::tick_duration(self.tick_ms)
    }

    /// Fixed-mode start time; an unparseable value falls back to 09:00
    pub fn fixed_start_time(&self) -> NaiveTime {
        parse_clock_time(&self.fixed_start).unwrap_or_else(|| {
            warn!(value = %self.fixed_start, "invalid fixed_start setting, using {}", DEFAULT_FIXED_START);
            NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
        })
    }
}

/// Load settings from settings.json, defaults when the file doesn't exist
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lead_in(), Duration::seconds(92));
        assert_eq!(settings.main_offset(), Duration::minutes(510));
        assert_eq!(settings.interim_offset(), Duration::minutes(450));
        assert_eq!(settings.fixed_start_time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "lead_in_secs": 95, "fixed_start": "08:30" }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.lead_in_secs, 95);
        assert_eq!(settings.fixed_start_time(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(settings.main_offset_mins, 510);
        assert_eq!(settings.start_time_file, "start_time.txt");
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            tick_ms: 250,
            interim_offset_mins: 420,
            ..Settings::default()
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_out_of_range_durations_fall_back() {
        let settings = Settings {
            lead_in_secs: i64::MAX,
            main_offset_mins: 9_000_000_000_000,
            interim_offset_mins: -5,
            ..Settings::default()
        };
        assert_eq!(settings.lead_in(), Duration::seconds(92));
        assert_eq!(settings.main_offset(), Duration::minutes(510));
        assert_eq!(settings.interim_offset(), Duration::minutes(450));

        let edge = Settings {
            lead_in_secs: 0,
            main_offset_mins: 24 * 60,
            ..Settings::default()
        };
        assert_eq!(edge.lead_in(), Duration::zero());
        assert_eq!(edge.main_offset(), Duration::hours(24));
    }

    #[test]
    fn test_bad_fixed_start_falls_back() {
        let settings = Settings {
            fixed_start: "nine".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.fixed_start_time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_fixed_start_with_seconds() {
        let settings = Settings {
            fixed_start: "07:45:30".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.fixed_start_time(), NaiveTime::from_hms_opt(7, 45, 30).unwrap());
    }
}

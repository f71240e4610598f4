use crate::domain::{DeadlinePolicy, StartMode};
use crate::persistence::{load_settings, ModeStore, Settings, StartTimeStore};
use crate::resolver::DayResolver;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "workday.log";

/// Everything a session needs to know about its environment, built once at
/// startup and handed to the pieces that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub dir: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Load the settings of an existing data directory.
    ///
    /// Broken settings are reported and replaced with defaults.
    pub fn load(dir: &Path) -> Self {
        let settings_path = dir.join(SETTINGS_FILE);
        let settings = load_settings(&settings_path).unwrap_or_else(|e| {
            warn!(path = %settings_path.display(), error = %e, "using default settings");
            Settings::default()
        });

        Self::with_settings(dir, settings)
    }

    pub fn with_settings(dir: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            dir: dir.into(),
            settings,
        }
    }

    pub fn start_time_path(&self) -> PathBuf {
        self.dir.join(&self.settings.start_time_file)
    }

    pub fn mode_path(&self) -> PathBuf {
        self.dir.join(&self.settings.mode_file)
    }

    pub fn start_time_store(&self) -> StartTimeStore {
        StartTimeStore::new(self.start_time_path())
    }

    pub fn mode_store(&self) -> ModeStore {
        ModeStore::new(self.mode_path())
    }

    pub fn deadline_policy(&self) -> DeadlinePolicy {
        DeadlinePolicy::from(&self.settings)
    }

    /// Resolver bound to the given mode, which the caller reads once per session
    pub fn resolver(&self, mode: StartMode) -> DayResolver {
        DayResolver::new(self.start_time_store(), mode, &self.settings)
    }
}

use crate::domain::StartMode;
use crate::persistence::files::{atomic_write, read_file};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

/// Parse the stored flag token ("true"/"false", any case)
pub fn parse_mode_token(token: &str) -> Option<bool> {
    let token = token.trim();
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Persisted flexible/fixed start flag, a single token overwritten on change
#[derive(Debug, Clone)]
pub struct ModeStore {
    path: PathBuf,
}

impl ModeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Whether start time follows the first activity of the day.
    ///
    /// Defaults to flexible when the file is missing or unreadable.
    pub fn is_flexible(&self) -> bool {
        match read_file(&self.path) {
            Ok(Some(content)) => parse_mode_token(&content).unwrap_or_else(|| {
                warn!(path = %self.path.display(), token = %content.trim(), "unrecognised mode token, using flexible");
                true
            }),
            Ok(None) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read mode file, using flexible");
                true
            }
        }
    }

    pub fn load(&self) -> StartMode {
        StartMode::from_flexible(self.is_flexible())
    }

    /// Persist the flag, replacing the previous value atomically
    pub fn set_flexible(&self, flexible: bool) -> Result<()> {
        atomic_write(&self.path, if flexible { "true" } else { "false" })?;
        info!(flexible, "start mode saved");
        Ok(())
    }

    /// Flip the persisted flag and return the new mode
    pub fn toggle(&self) -> Result<StartMode> {
        let next = !self.is_flexible();
        self.set_flexible(next)?;
        Ok(StartMode::from_flexible(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_mode_token() {
        assert_eq!(parse_mode_token("true"), Some(true));
        assert_eq!(parse_mode_token("TRUE\n"), Some(true));
        assert_eq!(parse_mode_token(" False "), Some(false));
        assert_eq!(parse_mode_token("yes"), None);
        assert_eq!(parse_mode_token(""), None);
    }

    #[test]
    fn test_missing_file_defaults_to_flexible() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ModeStore::new(temp_dir.path().join("flexible_mode.txt"));
        assert!(store.is_flexible());
        assert_eq!(store.load(), StartMode::Flexible);
    }

    #[test]
    fn test_garbage_defaults_to_flexible() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("flexible_mode.txt");
        fs::write(&path, "maybe").unwrap();

        assert!(ModeStore::new(&path).is_flexible());
    }

    #[test]
    fn test_round_trip_across_instances() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("flexible_mode.txt");

        ModeStore::new(&path).set_flexible(false).unwrap();
        assert!(!ModeStore::new(&path).is_flexible());

        ModeStore::new(&path).set_flexible(true).unwrap();
        assert!(ModeStore::new(&path).is_flexible());
        assert_eq!(fs::read_to_string(&path).unwrap(), "true");
    }

    #[test]
    fn test_stored_token_is_case_insensitive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("flexible_mode.txt");
        fs::write(&path, "True\n").unwrap();

        assert_eq!(ModeStore::new(&path).load(), StartMode::Flexible);
    }

    #[test]
    fn test_toggle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ModeStore::new(temp_dir.path().join("flexible_mode.txt"));

        assert_eq!(store.toggle().unwrap(), StartMode::Fixed);
        assert!(!store.is_flexible());
        assert_eq!(store.toggle().unwrap(), StartMode::Flexible);
        assert!(store.is_flexible());
    }
}

use crate::error::TimestampError;
use crate::persistence::files::{append_to_file, read_file};
use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk format of a start record, microsecond precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Accepts any fractional precision (or none) when reading back
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Format an instant as a start-time record line (without newline)
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse one start-time record line
pub fn parse_timestamp(line: &str) -> Result<NaiveDateTime, TimestampError> {
    let value = line.trim();
    if value.is_empty() {
        return Err(TimestampError::Empty);
    }
    NaiveDateTime::parse_from_str(value, PARSE_FORMAT).map_err(|source| TimestampError::Invalid {
        value: value.to_string(),
        source,
    })
}

/// Append-only text file holding one start timestamp per workday.
///
/// Only the last line matters for today's resolution; earlier lines are kept
/// as an audit trail and are never rewritten.
#[derive(Debug, Clone)]
pub struct StartTimeStore {
    path: PathBuf,
}

impl StartTimeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> Option<String> {
        match read_file(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read start-time file");
                None
            }
        }
    }

    /// The most recent start record, if the last line is well formed.
    ///
    /// A missing file, an empty file, or a malformed last line all yield
    /// `None`. The malformed line is left in place.
    pub fn read_last(&self) -> Option<NaiveDateTime> {
        let content = self.read_content()?;
        let last_line = content.lines().rev().find(|line| !line.trim().is_empty())?;

        match parse_timestamp(last_line) {
            Ok(timestamp) => Some(timestamp),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed start record");
                None
            }
        }
    }

    /// Every well-formed record in file order; malformed lines are skipped
    pub fn read_all(&self) -> Vec<NaiveDateTime> {
        let Some(content) = self.read_content() else {
            return Vec::new();
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match parse_timestamp(line) {
                Ok(timestamp) => Some(timestamp),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping malformed start record");
                    None
                }
            })
            .collect()
    }

    /// Durably append a new start record
    pub fn append(&self, timestamp: NaiveDateTime) -> Result<()> {
        let line = format!("{}\n", format_timestamp(timestamp));
        append_to_file(&self.path, &line)?;
        debug!(path = %self.path.display(), record = %line.trim_end(), "appended start record");
        Ok(())
    }
}

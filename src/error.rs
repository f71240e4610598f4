use thiserror::Error;

/// Failure to read a line of the start-time file as a timestamp
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("empty timestamp")]
    Empty,

    #[error("invalid timestamp {value:?}: {source}")]
    Invalid {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Rejected custom countdown input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationInputError {
    #[error("enter a whole number of minutes, got {0:?}")]
    NotANumber(String),

    #[error("duration must be at least one minute")]
    NotPositive,

    #[error("{minutes} minutes is longer than the {max} minute limit")]
    TooLong { minutes: u32, max: u32 },
}

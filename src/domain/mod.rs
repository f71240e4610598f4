pub mod countdown;
pub mod deadline;
pub mod enums;

pub use countdown::{parse_custom_minutes, CustomCountdown, DEFAULT_CUSTOM_MINUTES, MAX_CUSTOM_MINUTES};
pub use deadline::{format_remaining, DeadlinePolicy, Deadlines, TrackedDeadline};
pub use enums::{Alert, DeadlineKind, DeadlineState, StartMode, UiMode};

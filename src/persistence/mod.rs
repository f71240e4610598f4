pub mod files;
pub mod mode;
pub mod settings;
pub mod start_times;

pub use files::{atomic_write, ensure_dir, get_workday_dir, init_local_workday};
pub use mode::ModeStore;
pub use settings::{load_settings, save_settings, Settings};
pub use start_times::{format_timestamp, StartTimeStore};

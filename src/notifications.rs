//! Cross-platform notification support
//! Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Post a desktop notification. Best effort: failures are only logged.
pub fn notify(title: &str, message: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            message.replace('"', "\\\""),
            title.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::warn!(error = %e, "failed to post notification");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        tracing::debug!(title, message, "notifications not supported on this platform");
    }
}

/// Process-wide runtime state shared between the bot and the webserver
///
/// Keeps the startup instant for uptime reporting. All code state lives in
/// the CodeStore; nothing here duplicates it.
use once_cell::sync::Lazy;
use std::time::Instant;

/// Process start time, captured on first access during startup
static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Bot username learned from getMe during startup
static BOT_NAME: once_cell::sync::OnceCell<String> = once_cell::sync::OnceCell::new();

/// Record the bot's username once it is known
pub fn set_bot_name(name: &str) {
    let _ = BOT_NAME.set(name.to_string());
}

/// The bot's username, or "unknown" before startup completes
pub fn bot_name() -> String {
    BOT_NAME
        .get()
        .cloned()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Capture the process start time
///
/// Call once early in main so uptime measures from actual startup rather
/// than from the first status request.
pub fn mark_started() {
    Lazy::force(&START_TIME);
}

/// Seconds elapsed since startup
pub fn uptime_seconds() -> u64 {
    START_TIME.elapsed().as_secs()
}

/// Format an uptime in seconds as "2h 5m 3s" / "5m 3s" / "3s"
pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(3), "3s");
        assert_eq!(format_uptime(63), "1m 3s");
        assert_eq!(format_uptime(3600), "1h 0m 0s");
        assert_eq!(format_uptime(7384), "2h 3m 4s");
    }
}

/// Central log filtering
///
/// Rules:
/// 1. Errors always log
/// 2. Debug requires the matching --debug-<module> flag or --verbose
use super::format;
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level == LogLevel::Debug {
        return tag.debug_enabled();
    }

    true
}

/// Internal logging entry point with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    format::format_and_log(tag, level, message);
}

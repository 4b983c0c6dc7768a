//! Structured logging for RedeemBot
//!
//! Console logging with log levels, per-module tags, and debug gating
//! driven by command-line flags:
//!
//! ```rust,ignore
//! use redeembot::logger::{self, LogTag};
//!
//! logger::info(LogTag::Telegram, "Bot connected");
//! logger::warning(LogTag::Membership, "Lookup failed, treating as non-member");
//! logger::debug(LogTag::Store, "Code WELCOME1 redeemed"); // only with --debug-store
//! ```
//!
//! Debug logs are filtered per tag (`--debug-telegram`, `--debug-store`, ...)
//! and `--verbose` enables everything.

mod core;
mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching `--debug-<module>` flag (or `--verbose`)
/// is present on the command line.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log line formatting and console output
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::Colorize;

/// Format a log line and write it to the console
///
/// Layout: `HH:MM:SS LEVEL [TAG] message`
/// Errors and warnings go to stderr, everything else to stdout.
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let timestamp = Local::now().format("%H:%M:%S");

    let level_str = match level {
        LogLevel::Error => level.as_str().red().bold(),
        LogLevel::Warning => level.as_str().yellow().bold(),
        LogLevel::Info => level.as_str().green(),
        LogLevel::Debug => level.as_str().cyan(),
    };

    let line = format!(
        "{} {} [{}] {}",
        timestamp.to_string().dimmed(),
        level_str,
        tag.as_str().blue(),
        message
    );

    match level {
        LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

/// Centralized argument handling for RedeemBot
///
/// Consolidates command-line argument parsing and debug flag checking so the
/// logger and individual modules never touch env::args directly.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Store module debug mode
pub fn is_debug_store_enabled() -> bool {
    has_arg("--debug-store")
}

/// Telegram module debug mode
pub fn is_debug_telegram_enabled() -> bool {
    has_arg("--debug-telegram")
}

/// Membership gate debug mode
pub fn is_debug_membership_enabled() -> bool {
    has_arg("--debug-membership")
}

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Global verbose mode
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

/// Help requested
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Print usage information
pub fn print_help() {
    println!("RedeemBot - Telegram redeem code bot with status webserver");
    println!();
    println!("USAGE:");
    println!("  redeembot [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("  --debug-store        Enable code store debug logging");
    println!("  --debug-telegram     Enable Telegram debug logging");
    println!("  --debug-membership   Enable membership gate debug logging");
    println!("  --debug-webserver    Enable webserver debug logging");
    println!("  --verbose            Enable verbose logging for all modules");
    println!("  -h, --help           Print this help message");
    println!();
    println!("CONFIGURATION (environment variables, .env supported):");
    println!("  BOT_TOKEN            Telegram bot token (required)");
    println!("  ADMIN_IDS            Comma-separated admin user ids (required)");
    println!("  FORCE_JOIN_CHANNELS  Comma-separated required channels (required)");
    println!("  WEB_SECRET           Shared secret for protected HTTP endpoints");
    println!("  BOT_VERSION          Version string reported by /status");
    println!("  HOST                 HTTP bind host (default 0.0.0.0)");
    println!("  PORT                 HTTP port (default 5000)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_arg() {
        set_cmd_args(vec![
            "redeembot".to_string(),
            "--debug-store".to_string(),
            "--verbose".to_string(),
        ]);
        assert!(is_debug_store_enabled());
        assert!(is_verbose_enabled());
        assert!(!is_debug_webserver_enabled());
    }
}

use redeembot::{
    arguments::{self, print_help},
    config, global,
    logger::{self, LogTag},
    run,
};

/// Main entry point for the redeem bot
///
/// Loads configuration from the environment, then runs the Telegram
/// dispatcher and the status webserver side by side until Ctrl-C.
#[tokio::main]
async fn main() {
    arguments::set_cmd_args(std::env::args().collect());

    // Check for help request first (before any other processing)
    if arguments::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    // .env is optional; real deployments export the variables directly
    let _ = dotenv::dotenv();

    global::mark_started();
    logger::info(LogTag::System, "🚀 Redeem bot starting up...");

    if let Err(e) = config::load_config() {
        logger::error(LogTag::Config, &format!("❌ {}", e));
        std::process::exit(1);
    }

    if let Err(e) = run::run().await {
        logger::error(LogTag::System, &format!("❌ Fatal: {}", e));
        std::process::exit(1);
    }
}

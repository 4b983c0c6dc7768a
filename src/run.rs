//! Service startup and wiring
//!
//! Builds the shared components, starts the webserver task and runs the
//! Telegram dispatcher until shutdown.

use crate::logger::{self, LogTag};
use crate::membership::{MembershipGate, TelegramMemberApi};
use crate::store::CodeStore;
use crate::telegram::{self, ProofTracker};
use crate::webserver;
use std::sync::Arc;

/// Run the bot until shutdown
pub async fn run() -> Result<(), String> {
    let bot = telegram::init_bot().await?;

    let store = Arc::new(CodeStore::new());
    let gate = Arc::new(MembershipGate::new(Arc::new(TelegramMemberApi::new(
        bot.clone(),
    ))));
    let proofs = Arc::new(ProofTracker::new());

    telegram::init_notifier(bot.clone());

    // Webserver runs beside the dispatcher; a bind failure is fatal
    let web_store = Arc::clone(&store);
    let web_handle = tokio::spawn(async move {
        if let Err(e) = webserver::start_server(web_store).await {
            logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
            std::process::exit(1);
        }
    });

    telegram::run_dispatcher(bot, store, gate, proofs).await;

    // Dispatcher returned (Ctrl-C); take the webserver down with it
    webserver::shutdown();
    let _ = web_handle.await;

    logger::info(LogTag::System, "Shutdown complete");
    Ok(())
}

//! Update dispatch loop
//!
//! Wires the command, callback and fallback handlers into a single dptree
//! schema and runs long polling until shutdown.

use crate::logger::{self, LogTag};
use crate::membership::MembershipGate;
use crate::store::CodeStore;
use crate::telegram::commands::{self, Command};
use crate::telegram::proof::ProofTracker;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(commands::handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(commands::callbacks::handle_callback))
        .branch(Update::filter_message().endpoint(commands::handle_message))
}

/// Run the dispatcher until Ctrl-C or polling failure
pub async fn run_dispatcher(
    bot: Bot,
    store: Arc<CodeStore>,
    gate: Arc<MembershipGate>,
    proofs: Arc<ProofTracker>,
) {
    logger::info(LogTag::Telegram, "Starting update dispatcher");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![store, gate, proofs])
        .default_handler(|upd| async move {
            logger::debug(
                LogTag::Telegram,
                &format!("Unhandled update kind: {:?}", upd.kind),
            );
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    logger::info(LogTag::Telegram, "Update dispatcher stopped");
}

//! Command routing
//!
//! Each command is a stateless handler; the only cross-command state is the
//! ProofTracker. Unknown commands and malformed arguments always produce a
//! usage reply, never a crash.

pub mod callbacks;
pub mod codes;
pub mod status;

use crate::config::with_config;
use crate::errors::RedeemError;
use crate::logger::{self, LogTag};
use crate::membership::MembershipGate;
use crate::store::CodeStore;
use crate::telegram::formatters;
use crate::telegram::proof::ProofTracker;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

/// The bot's textual command surface
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case")]
pub enum Command {
    /// Welcome message; admins get the command menu
    Start,
    /// /generate <code> <message> - single-use code (admin)
    Generate(String),
    /// /generate_multi <code> <limit> [message] - multi-use code (admin)
    GenerateMulti(String),
    /// /generate_random [message] - random single-use code (admin)
    GenerateRandom(String),
    /// /redeem <code> - consume a code
    Redeem(String),
    /// List all codes (admin)
    Listcodes,
    /// /deletecode <code> - remove a code (admin)
    Deletecode(String),
    /// Round-trip latency and uptime
    Ping,
}

/// Route a parsed command to its handler
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: Arc<CodeStore>,
    gate: Arc<MembershipGate>,
    proofs: Arc<ProofTracker>,
) -> ResponseResult<()> {
    let user_id = match &msg.from {
        Some(user) => user.id.0,
        // Commands from channels/anonymous senders carry no user; ignore
        None => return Ok(()),
    };

    logger::debug(
        LogTag::Telegram,
        &format!("Command {:?} from user {}", cmd, user_id),
    );

    match cmd {
        Command::Start => status::handle_start(&bot, &msg, user_id).await,
        Command::Ping => status::handle_ping(&bot, &msg).await,
        Command::Generate(args) => {
            codes::handle_generate(&bot, &msg, user_id, &args, &store).await
        }
        Command::GenerateMulti(args) => {
            codes::handle_generate_multi(&bot, &msg, user_id, &args, &store).await
        }
        Command::GenerateRandom(args) => {
            codes::handle_generate_random(&bot, &msg, user_id, &args, &store).await
        }
        Command::Redeem(args) => {
            codes::handle_redeem(&bot, &msg, user_id, &args, &store, &gate, &proofs).await
        }
        Command::Listcodes => codes::handle_listcodes(&bot, &msg, user_id, &store).await,
        Command::Deletecode(args) => {
            codes::handle_deletecode(&bot, &msg, user_id, &args, &store).await
        }
    }

    Ok(())
}

/// Fallback for messages that are not recognized commands
///
/// Two jobs: consume pending proof photos, and answer unknown slash
/// commands with the usage text.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    proofs: Arc<ProofTracker>,
) -> ResponseResult<()> {
    let user_id = match &msg.from {
        Some(user) => user.id.0,
        None => return Ok(()),
    };

    if msg.photo().is_some() && proofs.has_pending(user_id) {
        callbacks::handle_proof_photo(&bot, &msg, user_id, &proofs).await;
        return Ok(());
    }

    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            reply_html(&bot, &msg, &formatters::msg_admin_commands()).await;
        }
    }

    Ok(())
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Send an HTML reply, logging and swallowing failures
pub(crate) async fn reply_html(bot: &Bot, msg: &Message, text: &str) -> Option<Message> {
    match bot
        .send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await
    {
        Ok(sent) => Some(sent),
        Err(e) => {
            logger::warning(LogTag::Telegram, &format!("Failed to send reply: {}", e));
            None
        }
    }
}

/// Admin allow-list check with a denial reply on failure
pub(crate) async fn require_admin(bot: &Bot, msg: &Message, user_id: u64) -> bool {
    if with_config(|cfg| cfg.is_admin(user_id)) {
        return true;
    }

    let denial = RedeemError::Unauthorized { user_id };
    logger::debug(LogTag::Telegram, &denial.to_string());
    reply_html(bot, msg, &formatters::msg_not_admin()).await;
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands;

    #[test]
    fn test_command_parsing() {
        let parse = |text: &str| Command::parse(text, "redeembot");

        assert_eq!(parse("/start").unwrap(), Command::Start);
        assert_eq!(parse("/ping").unwrap(), Command::Ping);
        assert_eq!(
            parse("/generate WELCOME1 hello there").unwrap(),
            Command::Generate("WELCOME1 hello there".to_string())
        );
        assert_eq!(
            parse("/generate_multi BONUS 5 enjoy").unwrap(),
            Command::GenerateMulti("BONUS 5 enjoy".to_string())
        );
        assert_eq!(
            parse("/redeem WELCOME1").unwrap(),
            Command::Redeem("WELCOME1".to_string())
        );
        assert_eq!(parse("/listcodes").unwrap(), Command::Listcodes);
        assert!(parse("/unknowncmd").is_err());
    }
}

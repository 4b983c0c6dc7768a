//! Inline button click handlers

use crate::logger::{self, LogTag};
use crate::telegram::proof::ProofTracker;
use crate::telegram::{formatters, keyboards};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, Message, ParseMode, ReplyParameters};

/// Route a callback query by its data payload
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    proofs: Arc<ProofTracker>,
) -> ResponseResult<()> {
    let Some(data) = q.data.clone() else {
        return Ok(());
    };

    logger::debug(
        LogTag::Telegram,
        &format!("Callback '{}' from user {}", data, q.from.id),
    );

    match data.as_str() {
        "show_commands" => show_commands(&bot, &q).await,
        "back_to_start" => back_to_start(&bot, &q).await,
        "proof:cancel" => proof_cancel(&bot, &q, &proofs).await,
        other if other.starts_with("proof:submit:") => proof_submit(&bot, &q, &proofs).await,
        _ => {
            let _ = bot.answer_callback_query(q.id.clone()).await;
        }
    }

    Ok(())
}

/// "📜 Commands" - swap the welcome message for the command list
async fn show_commands(bot: &Bot, q: &CallbackQuery) {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    if let Some(message) = &q.message {
        let _ = bot
            .edit_message_text(
                message.chat().id,
                message.id(),
                formatters::msg_admin_commands(),
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::back_to_start())
            .await;
    }
}

/// "⬅️ Back" - restore the admin welcome message
async fn back_to_start(bot: &Bot, q: &CallbackQuery) {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    if let Some(message) = &q.message {
        let _ = bot
            .edit_message_text(
                message.chat().id,
                message.id(),
                formatters::msg_welcome_admin(),
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::admin_menu())
            .await;
    }
}

// =============================================================================
// PROOF FLOW
// =============================================================================

/// Parse "proof:submit:<code>:<creator_id>" callback data
fn parse_proof_submit(data: &str) -> Option<(String, u64)> {
    let rest = data.strip_prefix("proof:submit:")?;
    let (identifier, creator) = rest.split_once(':')?;
    if identifier.is_empty() {
        return None;
    }
    let creator_id = creator.parse::<u64>().ok()?;
    Some((identifier.to_string(), creator_id))
}

/// "📸 Submit proof" - open a pending proof request for the user
async fn proof_submit(bot: &Bot, q: &CallbackQuery, proofs: &ProofTracker) {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(data) = &q.data else { return };
    let Some((identifier, creator_id)) = parse_proof_submit(data) else {
        logger::warning(
            LogTag::Telegram,
            &format!("Malformed proof callback data: {}", data),
        );
        return;
    };

    let user_id = q.from.id.0;
    proofs.open(user_id, identifier, creator_id);

    if let Some(message) = &q.message {
        let mut request = bot
            .send_message(message.chat().id, formatters::msg_proof_prompt())
            .reply_markup(keyboards::proof_cancel());

        // Thread the prompt beneath the delivered reward when we know it
        if let Some(reward_msg_id) = proofs.last_reward_message(user_id) {
            request = request.reply_parameters(ReplyParameters::new(reward_msg_id));
        }

        let _ = request.await;
    }
}

/// "❌ Cancel" / "❌ No thanks" - drop any pending proof request
async fn proof_cancel(bot: &Bot, q: &CallbackQuery, proofs: &ProofTracker) {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    if proofs.cancel(q.from.id.0) {
        if let Some(message) = &q.message {
            let _ = bot
                .send_message(message.chat().id, formatters::msg_proof_cancelled())
                .await;
        }
    }
}

/// A photo arrived from a user with a pending proof request
///
/// Consumes the request and forwards the screenshot to the code's creator.
/// A failed forward is logged and ignored; the user still gets confirmation
/// because their part is done.
pub async fn handle_proof_photo(bot: &Bot, msg: &Message, user_id: u64, proofs: &ProofTracker) {
    let Some(proof) = proofs.take(user_id) else {
        return;
    };

    let Some(photos) = msg.photo() else { return };
    let Some(best) = photos.last() else { return };

    let caption = format!(
        "📸 <b>Redemption proof</b>\n\n\
         Code: <code>{}</code>\n\
         User: <code>{}</code>",
        formatters::html_escape(&proof.identifier),
        user_id
    );

    if let Err(e) = bot
        .send_photo(
            ChatId(proof.creator_id as i64),
            InputFile::file_id(best.file.id.clone()),
        )
        .caption(caption)
        .parse_mode(ParseMode::Html)
        .await
    {
        logger::warning(
            LogTag::Telegram,
            &format!(
                "Failed to forward proof for '{}' to {}: {}",
                proof.identifier, proof.creator_id, e
            ),
        );
    }

    let _ = bot
        .send_message(msg.chat.id, formatters::msg_proof_submitted())
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proof_submit() {
        assert_eq!(
            parse_proof_submit("proof:submit:WELCOME1:1000"),
            Some(("WELCOME1".to_string(), 1000))
        );
        assert_eq!(parse_proof_submit("proof:submit::1000"), None);
        assert_eq!(parse_proof_submit("proof:submit:WELCOME1:abc"), None);
        assert_eq!(parse_proof_submit("proof:submit:WELCOME1"), None);
        assert_eq!(parse_proof_submit("proof:cancel"), None);
    }
}

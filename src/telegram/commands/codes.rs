//! Code management and redemption handlers

use crate::config::with_config;
use crate::errors::RedeemError;
use crate::logger::{self, LogTag};
use crate::membership::MembershipGate;
use crate::store::{
    generate_random_identifier, CodeStore, MediaKind, MediaRef, Redemptions, RewardPayload,
};
use crate::telegram::commands::{reply_html, require_admin};
use crate::telegram::proof::ProofTracker;
use crate::telegram::{formatters, keyboards, notifier, Notification};
use teloxide::prelude::*;
use teloxide::types::{InputFile, Message, ParseMode, ReplyParameters};

// =============================================================================
// GENERATE
// =============================================================================

pub async fn handle_generate(
    bot: &Bot,
    msg: &Message,
    user_id: u64,
    args: &str,
    store: &CodeStore,
) {
    if !require_admin(bot, msg, user_id).await {
        return;
    }

    let Some((identifier, message)) = parse_generate_args(args) else {
        reply_html(
            bot,
            msg,
            &formatters::msg_usage("/generate <code> <message>"),
        )
        .await;
        return;
    };

    create_and_reply(
        bot,
        msg,
        store,
        &identifier,
        Redemptions::single(),
        RewardPayload::text(message),
        user_id,
        false,
    )
    .await;
}

pub async fn handle_generate_multi(
    bot: &Bot,
    msg: &Message,
    user_id: u64,
    args: &str,
    store: &CodeStore,
) {
    if !require_admin(bot, msg, user_id).await {
        return;
    }

    let Some((identifier, limit, message)) = parse_multi_args(args) else {
        reply_html(
            bot,
            msg,
            &formatters::msg_usage("/generate_multi <code> <limit> [message]"),
        )
        .await;
        return;
    };

    let media = match extract_reply_media(msg) {
        Ok(media) => media,
        Err(RedeemError::MediaUnsupported) => {
            reply_html(bot, msg, &formatters::msg_media_unsupported()).await;
            return;
        }
        Err(_) => None,
    };

    let has_media = media.is_some();
    create_and_reply(
        bot,
        msg,
        store,
        &identifier,
        Redemptions::multi(limit),
        RewardPayload {
            text: message,
            media,
        },
        user_id,
        has_media,
    )
    .await;
}

pub async fn handle_generate_random(
    bot: &Bot,
    msg: &Message,
    user_id: u64,
    args: &str,
    store: &CodeStore,
) {
    if !require_admin(bot, msg, user_id).await {
        return;
    }

    let message = args.trim();
    let media = match extract_reply_media(msg) {
        Ok(media) => media,
        Err(RedeemError::MediaUnsupported) => {
            reply_html(bot, msg, &formatters::msg_media_unsupported()).await;
            return;
        }
        Err(_) => None,
    };

    let identifier = generate_random_identifier();
    let has_media = media.is_some();
    create_and_reply(
        bot,
        msg,
        store,
        &identifier,
        Redemptions::single(),
        RewardPayload {
            text: if message.is_empty() {
                None
            } else {
                Some(message.to_string())
            },
            media,
        },
        user_id,
        has_media,
    )
    .await;
}

#[allow(clippy::too_many_arguments)]
async fn create_and_reply(
    bot: &Bot,
    msg: &Message,
    store: &CodeStore,
    identifier: &str,
    redemptions: Redemptions,
    reward: RewardPayload,
    creator_id: u64,
    has_media: bool,
) {
    let mode = redemptions.mode_str();
    let limit = redemptions.limit();

    match store.create(identifier, redemptions, reward, creator_id) {
        Ok(()) => {
            reply_html(
                bot,
                msg,
                &formatters::msg_code_created(identifier, mode, limit, has_media),
            )
            .await;
        }
        Err(RedeemError::DuplicateCode { .. }) => {
            reply_html(bot, msg, &formatters::msg_duplicate_code(identifier)).await;
        }
        Err(e) => {
            logger::error(LogTag::Store, &format!("Unexpected create error: {}", e));
        }
    }
}

// =============================================================================
// REDEEM
// =============================================================================

pub async fn handle_redeem(
    bot: &Bot,
    msg: &Message,
    user_id: u64,
    args: &str,
    store: &CodeStore,
    gate: &MembershipGate,
    proofs: &ProofTracker,
) {
    let identifier = args.trim();
    if identifier.is_empty() {
        reply_html(bot, msg, &formatters::msg_usage("/redeem <code>")).await;
        return;
    }

    // Force-join gate; fail-closed replies with a join prompt
    if !gate.is_member(user_id).await {
        let channels = with_config(|cfg| cfg.telegram.force_join_channels.clone());
        let _ = bot
            .send_message(msg.chat.id, formatters::msg_join_required())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::join_channels(&channels))
            .await;
        return;
    }

    let redeemed = match store.redeem(identifier, user_id) {
        Ok(redeemed) => redeemed,
        Err(RedeemError::UnknownCode { .. }) => {
            reply_html(bot, msg, &formatters::msg_unknown_code(identifier)).await;
            return;
        }
        Err(RedeemError::AlreadyRedeemed { .. }) => {
            reply_html(bot, msg, &formatters::msg_already_redeemed()).await;
            return;
        }
        Err(RedeemError::LimitReached { .. }) => {
            reply_html(bot, msg, &formatters::msg_limit_reached()).await;
            return;
        }
        Err(e) => {
            logger::error(LogTag::Store, &format!("Unexpected redeem error: {}", e));
            return;
        }
    };

    logger::info(
        LogTag::Store,
        &format!("Code '{}' redeemed by user {}", identifier, user_id),
    );

    let delivered = deliver_reward(bot, msg, identifier, &redeemed.reward).await;

    // Offer the proof flow threaded beneath the delivered reward
    if let Some(reward_msg) = delivered {
        proofs.set_last_reward_message(user_id, reward_msg.id);

        let _ = bot
            .send_message(msg.chat.id, formatters::msg_proof_offer())
            .reply_parameters(ReplyParameters::new(reward_msg.id))
            .reply_markup(keyboards::proof_offer(identifier, redeemed.creator_id))
            .await;
    }

    // Best-effort creator notification; never affects the redemption
    notifier::queue_notification(Notification::CodeRedeemed {
        identifier: identifier.to_string(),
        redeemer: user_id,
        creator_id: redeemed.creator_id,
        used: redeemed.used,
        limit: redeemed.limit,
    });
}

/// Send the reward text/media; returns the delivered message when any
async fn deliver_reward(
    bot: &Bot,
    msg: &Message,
    identifier: &str,
    reward: &RewardPayload,
) -> Option<Message> {
    let header = formatters::msg_reward_header(identifier);
    // Reward text is admin-authored and may carry its own HTML
    let body = match &reward.text {
        Some(text) => format!("{}\n\n{}", header, text),
        None => header,
    };

    let result = match &reward.media {
        Some(MediaRef { kind, file_id }) => {
            let file = InputFile::file_id(file_id.clone());
            match kind {
                MediaKind::Photo => {
                    bot.send_photo(msg.chat.id, file)
                        .caption(body)
                        .parse_mode(ParseMode::Html)
                        .await
                }
                MediaKind::Document => {
                    bot.send_document(msg.chat.id, file)
                        .caption(body)
                        .parse_mode(ParseMode::Html)
                        .await
                }
                MediaKind::Video => {
                    bot.send_video(msg.chat.id, file)
                        .caption(body)
                        .parse_mode(ParseMode::Html)
                        .await
                }
            }
        }
        None => {
            bot.send_message(msg.chat.id, body)
                .parse_mode(ParseMode::Html)
                .await
        }
    };

    match result {
        Ok(sent) => Some(sent),
        Err(e) => {
            logger::warning(
                LogTag::Telegram,
                &format!("Failed to deliver reward for '{}': {}", identifier, e),
            );
            None
        }
    }
}

// =============================================================================
// LIST / DELETE
// =============================================================================

pub async fn handle_listcodes(bot: &Bot, msg: &Message, user_id: u64, store: &CodeStore) {
    if !require_admin(bot, msg, user_id).await {
        return;
    }

    reply_html(bot, msg, &formatters::msg_code_list(&store.list())).await;
}

pub async fn handle_deletecode(
    bot: &Bot,
    msg: &Message,
    user_id: u64,
    args: &str,
    store: &CodeStore,
) {
    if !require_admin(bot, msg, user_id).await {
        return;
    }

    let identifier = args.trim();
    if identifier.is_empty() {
        reply_html(bot, msg, &formatters::msg_usage("/deletecode <code>")).await;
        return;
    }

    match store.delete(identifier) {
        Ok(()) => {
            reply_html(bot, msg, &formatters::msg_code_deleted(identifier)).await;
        }
        Err(_) => {
            reply_html(bot, msg, &formatters::msg_unknown_code(identifier)).await;
        }
    }
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

/// Parse "/generate <code> <message>" arguments
fn parse_generate_args(args: &str) -> Option<(String, String)> {
    let args = args.trim();
    let (code, message) = args.split_once(char::is_whitespace)?;
    let message = message.trim();
    if code.is_empty() || message.is_empty() {
        return None;
    }
    Some((code.to_string(), message.to_string()))
}

/// Parse "/generate_multi <code> <limit> [message]" arguments
///
/// The limit must be a positive integer.
fn parse_multi_args(args: &str) -> Option<(String, u32, Option<String>)> {
    let args = args.trim();
    let (code, rest) = args.split_once(char::is_whitespace)?;

    let rest = rest.trim();
    let (limit_str, message) = match rest.split_once(char::is_whitespace) {
        Some((limit, message)) => (limit, Some(message.trim().to_string())),
        None => (rest, None),
    };

    let limit = limit_str.parse::<u32>().ok().filter(|l| *l > 0)?;
    if code.is_empty() {
        return None;
    }

    Some((code.to_string(), limit, message.filter(|m| !m.is_empty())))
}

/// Pull an attachable media reference out of the replied-to message
///
/// Ok(None) when there is no reply or the reply is plain text;
/// MediaUnsupported when the reply carries media the bot cannot forward.
fn extract_reply_media(msg: &Message) -> Result<Option<MediaRef>, RedeemError> {
    let Some(reply) = msg.reply_to_message() else {
        return Ok(None);
    };

    if let Some(photos) = reply.photo() {
        if let Some(best) = photos.last() {
            return Ok(Some(MediaRef {
                kind: MediaKind::Photo,
                file_id: best.file.id.clone(),
            }));
        }
    }

    if let Some(document) = reply.document() {
        return Ok(Some(MediaRef {
            kind: MediaKind::Document,
            file_id: document.file.id.clone(),
        }));
    }

    if let Some(video) = reply.video() {
        return Ok(Some(MediaRef {
            kind: MediaKind::Video,
            file_id: video.file.id.clone(),
        }));
    }

    let has_other_media = reply.sticker().is_some()
        || reply.audio().is_some()
        || reply.voice().is_some()
        || reply.animation().is_some()
        || reply.video_note().is_some();

    if has_other_media {
        Err(RedeemError::MediaUnsupported)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_args() {
        assert_eq!(
            parse_generate_args("WELCOME1 hello there"),
            Some(("WELCOME1".to_string(), "hello there".to_string()))
        );
        assert_eq!(parse_generate_args("WELCOME1"), None);
        assert_eq!(parse_generate_args(""), None);
        assert_eq!(parse_generate_args("CODE   "), None);
    }

    #[test]
    fn test_parse_multi_args() {
        assert_eq!(
            parse_multi_args("BONUS 5 enjoy the bonus"),
            Some((
                "BONUS".to_string(),
                5,
                Some("enjoy the bonus".to_string())
            ))
        );
        assert_eq!(parse_multi_args("BONUS 5"), Some(("BONUS".to_string(), 5, None)));
        assert_eq!(parse_multi_args("BONUS"), None);
        assert_eq!(parse_multi_args("BONUS zero"), None);
        assert_eq!(parse_multi_args("BONUS 0"), None);
        assert_eq!(parse_multi_args(""), None);
    }
}

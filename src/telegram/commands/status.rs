//! Start and ping handlers

use crate::config::with_config;
use crate::global;
use crate::logger::{self, LogTag};
use crate::telegram::commands::reply_html;
use crate::telegram::{formatters, keyboards};
use std::time::Instant;
use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode};

/// Handle /start - welcome message, admin menu for admins
pub async fn handle_start(bot: &Bot, msg: &Message, user_id: u64) {
    if with_config(|cfg| cfg.is_admin(user_id)) {
        let _ = bot
            .send_message(msg.chat.id, formatters::msg_welcome_admin())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::admin_menu())
            .await;
    } else {
        reply_html(bot, msg, &formatters::msg_welcome_user()).await;
    }
}

/// Handle /ping - measure round-trip latency and report uptime
pub async fn handle_ping(bot: &Bot, msg: &Message) {
    let started = Instant::now();
    let sent = match bot.send_message(msg.chat.id, "🏓 Pinging...").await {
        Ok(sent) => sent,
        Err(e) => {
            logger::warning(LogTag::Telegram, &format!("/ping send failed: {}", e));
            return;
        }
    };
    let elapsed_ms = started.elapsed().as_millis();

    let uptime = global::format_uptime(global::uptime_seconds());
    let text = formatters::msg_ping(elapsed_ms, &uptime);

    if let Err(e) = bot
        .edit_message_text(msg.chat.id, sent.id, text)
        .parse_mode(ParseMode::Html)
        .await
    {
        logger::warning(LogTag::Telegram, &format!("/ping edit failed: {}", e));
    }
}

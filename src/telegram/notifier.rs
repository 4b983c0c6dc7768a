//! Best-effort notification delivery
//!
//! Cross-task notifications (redemption alerts to code creators, web events
//! to admins) go through one bounded mpsc queue consumed by a worker on the
//! bot's runtime. Delivery is best-effort by contract: a full queue drops
//! the notification with a warning, and a failed send (creator blocked the
//! bot, etc.) is logged and forgotten. Nothing here can fail a redemption.

use crate::config::with_config;
use crate::logger::{self, LogTag};
use crate::store::UserId;
use crate::telegram::formatters;
use once_cell::sync::Lazy;
use std::sync::RwLock;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::mpsc;

/// Queue capacity; beyond this, notifications are dropped
const QUEUE_CAPACITY: usize = 64;

/// A queued outbound notification
#[derive(Debug, Clone)]
pub enum Notification {
    /// A code was redeemed; tell its creator
    CodeRedeemed {
        identifier: String,
        redeemer: UserId,
        creator_id: UserId,
        used: u32,
        limit: u32,
    },
    /// A web endpoint event; tell every admin
    WebEvent { text: String },
}

static NOTIFICATION_QUEUE: Lazy<RwLock<Option<mpsc::Sender<Notification>>>> =
    Lazy::new(|| RwLock::new(None));

/// Start the notification worker and install the global queue sender
pub fn init_notifier(bot: Bot) {
    let (tx, mut rx) = mpsc::channel::<Notification>(QUEUE_CAPACITY);

    if let Ok(mut guard) = NOTIFICATION_QUEUE.write() {
        *guard = Some(tx);
    }

    tokio::spawn(async move {
        logger::info(LogTag::Telegram, "Notification worker started");
        while let Some(notification) = rx.recv().await {
            deliver(&bot, notification).await;
        }
        logger::info(LogTag::Telegram, "Notification worker stopped");
    });
}

/// Queue a notification (non-blocking, usable from any context)
pub fn queue_notification(notification: Notification) {
    if let Ok(guard) = NOTIFICATION_QUEUE.read() {
        if let Some(ref sender) = *guard {
            if sender.try_send(notification).is_err() {
                logger::warning(LogTag::Telegram, "Notification queue full, dropping message");
            }
        }
    }
}

async fn deliver(bot: &Bot, notification: Notification) {
    match notification {
        Notification::CodeRedeemed {
            identifier,
            redeemer,
            creator_id,
            used,
            limit,
        } => {
            let text = formatters::msg_creator_notification(&identifier, redeemer, used, limit);
            send_to(bot, creator_id, &text).await;
        }
        Notification::WebEvent { text } => {
            let admin_ids = with_config(|c| c.telegram.admin_ids.clone());
            for admin_id in admin_ids {
                send_to(bot, admin_id, &text).await;
            }
        }
    }
}

async fn send_to(bot: &Bot, user_id: UserId, text: &str) {
    if let Err(e) = bot
        .send_message(ChatId(user_id as i64), text)
        .parse_mode(ParseMode::Html)
        .await
    {
        // Recipient may have blocked the bot; by contract this is final
        logger::warning(
            LogTag::Telegram,
            &format!("Failed to notify {}: {}", user_id, e),
        );
    }
}

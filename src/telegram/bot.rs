//! Telegram bot creation and token validation

use crate::config::with_config;
use crate::logger::{self, LogTag};
use teloxide::prelude::*;

/// Create the bot from the configured token and validate it with getMe
pub async fn init_bot() -> Result<Bot, String> {
    let token = with_config(|c| c.telegram.bot_token.clone());

    let bot = Bot::new(&token);
    match bot.get_me().await {
        Ok(me) => {
            let username = me.username.as_deref().unwrap_or("unknown");
            crate::global::set_bot_name(username);
            logger::info(
                LogTag::Telegram,
                &format!("Bot initialized: @{} (ID: {})", username, me.id),
            );
            Ok(bot)
        }
        Err(e) => Err(format!("Invalid bot token: {}", e)),
    }
}

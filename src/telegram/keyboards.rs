//! Inline keyboard builders
//!
//! Pre-built layouts for the admin menu, the force-join prompt, and the
//! proof-submission offer.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Create a callback button
fn btn(text: &str, callback_data: &str) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.to_string(), callback_data.to_string())
}

/// Create a URL button (falls back to a dead callback on an invalid URL)
fn url_btn(text: &str, url: &str) -> InlineKeyboardButton {
    match url.parse() {
        Ok(parsed) => InlineKeyboardButton::url(text.to_string(), parsed),
        Err(_) => InlineKeyboardButton::callback(text.to_string(), "error:invalid_url".to_string()),
    }
}

/// Admin start menu: single "Commands" button
pub fn admin_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("📜 Commands", "show_commands")]])
}

/// Back button underneath the command list
pub fn back_to_start() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("⬅️ Back", "back_to_start")]])
}

/// Join buttons for every required channel
///
/// Only "@username" channels get a t.me link; numeric channel ids have no
/// public URL and are skipped.
pub fn join_channels(channels: &[String]) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = channels
        .iter()
        .filter_map(|channel| channel.strip_prefix('@'))
        .map(|name| vec![url_btn("📢 Join Channel", &format!("https://t.me/{}", name))])
        .collect();

    InlineKeyboardMarkup::new(rows)
}

/// Offer to submit redemption proof
///
/// Callback data carries the code and creator so the proof flow works even
/// if the code is deleted before the screenshot arrives.
pub fn proof_offer(identifier: &str, creator_id: u64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        btn(
            "📸 Submit proof",
            &format!("proof:submit:{}:{}", identifier, creator_id),
        ),
        btn("❌ No thanks", "proof:cancel"),
    ]])
}

/// Cancel button under the "send your screenshot" prompt
pub fn proof_cancel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("❌ Cancel", "proof:cancel")]])
}

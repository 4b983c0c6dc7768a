//! HTML message builders
//!
//! All user-facing Telegram text lives here so handlers stay thin. Replies
//! use Telegram HTML parse mode; anything user-supplied goes through
//! html_escape first.

use crate::store::CodeSummary;

/// Escape user-supplied text for Telegram HTML parse mode
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// =============================================================================
// WELCOME / MENU
// =============================================================================

pub fn msg_welcome_user() -> String {
    "👋 <b>Welcome to the Redeem Code Bot!</b>\n\n\
     <b>Use the command below to redeem your code:</b>\n\n\
     <code>/redeem &lt;code&gt;</code>\n\n\
     Enjoy! 🤍"
        .to_string()
}

pub fn msg_welcome_admin() -> String {
    format!(
        "{}\n\n<b>YOU ARE AN ADMIN OF THIS BOT 💗</b>\n<b>You can access commands 👇</b>",
        msg_welcome_user()
    )
}

pub fn msg_admin_commands() -> String {
    "🛠 <b>Admin Commands:</b>\n\n\
     <code>/generate &lt;code&gt; &lt;message&gt;</code> — One-time code\n\
     <code>/generate_multi &lt;code&gt; &lt;limit&gt; [message]</code> — Multi-use code\n\
     <code>/generate_random [message]</code> — Random one-time code\n\
     <code>/redeem &lt;code&gt;</code> — Redeem a code\n\
     <code>/listcodes</code> — List all codes\n\
     <code>/deletecode &lt;code&gt;</code> — Delete a code\n\
     <code>/ping</code> — System ping (latency + uptime)"
        .to_string()
}

pub fn msg_join_required() -> String {
    "⚠️ <b>You must join our channel to use this bot.</b>".to_string()
}

// =============================================================================
// CODE OPERATIONS
// =============================================================================

pub fn msg_code_created(identifier: &str, mode: &str, limit: u32, has_media: bool) -> String {
    let media_note = if has_media { " with media attached" } else { "" };
    format!(
        "✅ <b>Code created{}</b>\n\n\
         Code: <code>{}</code>\n\
         Mode: {}\n\
         Limit: {}",
        media_note,
        html_escape(identifier),
        mode,
        limit
    )
}

pub fn msg_code_deleted(identifier: &str) -> String {
    format!("🗑 Code <code>{}</code> deleted.", html_escape(identifier))
}

pub fn msg_unknown_code(identifier: &str) -> String {
    format!(
        "❌ Code <code>{}</code> does not exist.",
        html_escape(identifier)
    )
}

pub fn msg_duplicate_code(identifier: &str) -> String {
    format!(
        "⚠️ Code <code>{}</code> already exists.",
        html_escape(identifier)
    )
}

pub fn msg_already_redeemed() -> String {
    "⚠️ This code has already been redeemed.".to_string()
}

pub fn msg_limit_reached() -> String {
    "⚠️ This code has reached its redemption limit.".to_string()
}

pub fn msg_media_unsupported() -> String {
    "⚠️ The replied-to message carries a media type I cannot attach.\n\
     Supported: photo, document, video."
        .to_string()
}

pub fn msg_not_admin() -> String {
    "🚫 This command is restricted to bot admins.".to_string()
}

pub fn msg_code_list(codes: &[CodeSummary]) -> String {
    if codes.is_empty() {
        return "📭 No codes exist yet.".to_string();
    }

    let mut out = String::from("📜 <b>All Codes:</b>\n\n");
    for code in codes {
        out.push_str(&format!(
            "<code>{}</code> — {} ({}/{})\n",
            html_escape(&code.identifier),
            code.mode,
            code.used,
            code.limit
        ));
    }
    out
}

pub fn msg_reward_header(identifier: &str) -> String {
    format!(
        "🎉 <b>Code redeemed!</b>\n\nCode: <code>{}</code>",
        html_escape(identifier)
    )
}

pub fn msg_creator_notification(identifier: &str, redeemer: u64, used: u32, limit: u32) -> String {
    format!(
        "📩 <b>Code Redeemed</b>\n\n\
         Code: <code>{}</code>\n\
         User: <code>{}</code>\n\
         Usage: {}/{}",
        html_escape(identifier),
        redeemer,
        used,
        limit
    )
}

// =============================================================================
// PING
// =============================================================================

/// Classify a round-trip latency the way the original ping command did
pub fn classify_latency(elapsed_ms: u128) -> &'static str {
    if elapsed_ms < 150 {
        "Excellent ⚡"
    } else if elapsed_ms < 300 {
        "Good ✅"
    } else if elapsed_ms < 600 {
        "Moderate ⚠️"
    } else {
        "Poor ❌"
    }
}

pub fn msg_ping(elapsed_ms: u128, uptime: &str) -> String {
    format!(
        "<code>[ SYSTEM PING ]</code>\n\n\
         <code>≡ Response : {} ms</code>\n\
         <code>≡ Status   : {}</code>\n\
         <code>≡ Uptime   : {}</code>",
        elapsed_ms,
        classify_latency(elapsed_ms),
        uptime
    )
}

// =============================================================================
// PROOF FLOW
// =============================================================================

pub fn msg_proof_offer() -> String {
    "Want to send a screenshot as proof of your redemption?".to_string()
}

pub fn msg_proof_prompt() -> String {
    "📸 Send your screenshot as a photo now, or tap Cancel.".to_string()
}

pub fn msg_proof_submitted() -> String {
    "✅ Proof submitted. Thank you!".to_string()
}

pub fn msg_proof_cancelled() -> String {
    "Proof submission cancelled.".to_string()
}

// =============================================================================
// USAGE
// =============================================================================

pub fn msg_usage(usage: &str) -> String {
    format!("Usage: <code>{}</code>", usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CodeSummary;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_classify_latency() {
        assert_eq!(classify_latency(10), "Excellent ⚡");
        assert_eq!(classify_latency(150), "Good ✅");
        assert_eq!(classify_latency(400), "Moderate ⚠️");
        assert_eq!(classify_latency(1200), "Poor ❌");
    }

    #[test]
    fn test_code_list_escapes_identifiers() {
        let rows = vec![CodeSummary {
            identifier: "<EVIL>".to_string(),
            mode: "single-use",
            used: 0,
            limit: 1,
        }];
        let text = msg_code_list(&rows);
        assert!(text.contains("&lt;EVIL&gt;"));
        assert!(!text.contains("<EVIL>"));
    }
}

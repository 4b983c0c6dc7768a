//! Force-join membership gate
//!
//! Answers "may this user redeem?" by checking membership in every required
//! channel through the Telegram getChatMember API. Admins always pass. Any
//! lookup failure (bot lacks permission, malformed channel id) is treated as
//! non-membership - the gate fails closed and the caller shows a join prompt
//! instead of an error.
//!
//! Results are memoized per user for a short TTL to bound external call
//! volume; entries are invalidated purely by expiry.

use crate::config::with_config;
use crate::errors::RedeemError;
use crate::logger::{self, LogTag};
use crate::store::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, Recipient};

/// Default memoization window for membership verdicts
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

// =============================================================================
// API SEAM
// =============================================================================

/// The single external call the gate depends on, behind a seam for tests
#[async_trait]
pub trait ChatMemberApi: Send + Sync {
    /// Whether `user_id` currently belongs to `channel`
    ///
    /// Err means the lookup itself failed (permission, malformed target);
    /// the gate treats that the same as "not a member".
    async fn is_chat_member(&self, channel: &str, user_id: UserId) -> Result<bool, String>;
}

/// Production implementation backed by the Telegram Bot API
pub struct TelegramMemberApi {
    bot: Bot,
}

impl TelegramMemberApi {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatMemberApi for TelegramMemberApi {
    async fn is_chat_member(&self, channel: &str, user_id: UserId) -> Result<bool, String> {
        let recipient = parse_channel(channel)?;

        let member = self
            .bot
            .get_chat_member(recipient, teloxide::types::UserId(user_id))
            .await
            .map_err(|e| format!("getChatMember failed: {}", e))?;

        Ok(match member.kind {
            ChatMemberKind::Owner(_) | ChatMemberKind::Administrator(_) | ChatMemberKind::Member => {
                true
            }
            ChatMemberKind::Restricted(restricted) => restricted.is_member,
            ChatMemberKind::Left | ChatMemberKind::Banned(_) => false,
        })
    }
}

/// Resolve a configured channel string into a Telegram recipient
///
/// Accepts "@username" or a numeric chat id like "-1001234567890".
fn parse_channel(channel: &str) -> Result<Recipient, String> {
    if let Some(stripped) = channel.strip_prefix('@') {
        if stripped.is_empty() {
            return Err(format!("Malformed channel '{}'", channel));
        }
        Ok(Recipient::ChannelUsername(channel.to_string()))
    } else if let Ok(id) = channel.parse::<i64>() {
        Ok(Recipient::Id(ChatId(id)))
    } else {
        Err(format!("Malformed channel '{}'", channel))
    }
}

// =============================================================================
// GATE
// =============================================================================

struct CacheEntry {
    verdict: bool,
    checked_at: Instant,
}

/// Membership gate with a short-lived per-user verdict cache
pub struct MembershipGate {
    api: Arc<dyn ChatMemberApi>,
    cache: Mutex<HashMap<UserId, CacheEntry>>,
    ttl: Duration,
}

impl MembershipGate {
    pub fn new(api: Arc<dyn ChatMemberApi>) -> Self {
        Self::with_ttl(api, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(api: Arc<dyn ChatMemberApi>, ttl: Duration) -> Self {
        Self {
            api,
            cache: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Whether the user may pass the force-join gate
    ///
    /// Admins short-circuit to true without touching cache or network.
    /// Membership in every configured channel is required.
    pub async fn is_member(&self, user_id: UserId) -> bool {
        let (is_admin, channels) = with_config(|cfg| {
            (
                cfg.is_admin(user_id),
                cfg.telegram.force_join_channels.clone(),
            )
        });

        if is_admin {
            return true;
        }

        if let Some(verdict) = self.cached_verdict(user_id) {
            logger::debug(
                LogTag::Membership,
                &format!("Cache hit for user {}: {}", user_id, verdict),
            );
            return verdict;
        }

        let verdict = self.check_channels(user_id, &channels).await;
        self.remember(user_id, verdict);
        verdict
    }

    async fn check_channels(&self, user_id: UserId, channels: &[String]) -> bool {
        for channel in channels {
            match self.api.is_chat_member(channel, user_id).await {
                Ok(true) => {}
                Ok(false) => {
                    logger::debug(
                        LogTag::Membership,
                        &format!("User {} has not joined {}", user_id, channel),
                    );
                    return false;
                }
                Err(reason) => {
                    // Fail closed: a broken lookup must not open the gate
                    let error = RedeemError::MembershipCheckFailed {
                        channel: channel.clone(),
                        reason,
                    };
                    logger::warning(
                        LogTag::Membership,
                        &format!("{}; treating user {} as non-member", error, user_id),
                    );
                    return false;
                }
            }
        }
        true
    }

    fn cached_verdict(&self, user_id: UserId) -> Option<bool> {
        let cache = self.cache.lock().expect("membership cache mutex poisoned");
        cache
            .get(&user_id)
            .filter(|entry| entry.checked_at.elapsed() < self.ttl)
            .map(|entry| entry.verdict)
    }

    fn remember(&self, user_id: UserId, verdict: bool) {
        let mut cache = self.cache.lock().expect("membership cache mutex poisoned");
        // Drop expired entries opportunistically so the map stays bounded
        let ttl = self.ttl;
        cache.retain(|_, entry| entry.checked_at.elapsed() < ttl);
        cache.insert(
            user_id,
            CacheEntry {
                verdict,
                checked_at: Instant::now(),
            },
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{self, Config, TelegramConfig, WebserverConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn init_test_config() {
        let _ = config::set_config(Config {
            telegram: TelegramConfig {
                bot_token: "test-token".to_string(),
                admin_ids: vec![1000],
                force_join_channels: vec!["@chan".to_string()],
            },
            webserver: WebserverConfig {
                web_secret: "s3cret".to_string(),
                version: "test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
        });
    }

    /// Mock API: members fixed up front, every call counted
    struct MockApi {
        members: Vec<UserId>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockApi {
        fn new(members: Vec<UserId>) -> Self {
            Self {
                members,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                members: vec![],
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChatMemberApi for MockApi {
        async fn is_chat_member(&self, _channel: &str, user_id: UserId) -> Result<bool, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("bot is not an admin in the channel".to_string());
            }
            Ok(self.members.contains(&user_id))
        }
    }

    #[tokio::test]
    async fn test_member_passes_and_stranger_fails() {
        init_test_config();
        let gate = MembershipGate::new(Arc::new(MockApi::new(vec![42])));

        assert!(gate.is_member(42).await);
        assert!(!gate.is_member(7).await);
    }

    #[tokio::test]
    async fn test_admin_short_circuits_without_api_call() {
        init_test_config();
        let api = Arc::new(MockApi::new(vec![]));
        let gate = MembershipGate::new(api.clone());

        assert!(gate.is_member(1000).await);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_closed() {
        init_test_config();
        let gate = MembershipGate::new(Arc::new(MockApi::failing()));

        assert!(!gate.is_member(42).await);
    }

    #[tokio::test]
    async fn test_verdict_is_memoized_until_expiry() {
        init_test_config();
        let api = Arc::new(MockApi::new(vec![42]));
        let gate = MembershipGate::with_ttl(api.clone(), Duration::from_millis(50));

        assert!(gate.is_member(42).await);
        assert!(gate.is_member(42).await);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(gate.is_member(42).await);
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_parse_channel() {
        assert!(matches!(
            parse_channel("@mychannel"),
            Ok(Recipient::ChannelUsername(_))
        ));
        assert!(matches!(
            parse_channel("-1001234567890"),
            Ok(Recipient::Id(_))
        ));
        assert!(parse_channel("mychannel").is_err());
        assert!(parse_channel("@").is_err());
    }
}

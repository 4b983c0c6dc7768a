//! In-memory code store
//!
//! The single owner of all redeemable-code state. Every mutating operation
//! runs under one mutex, so concurrent access from the bot dispatcher and
//! the webserver is safe by construction and effects are immediately visible
//! to subsequent reads. Nothing is persisted: process termination loses all
//! codes.

use crate::errors::RedeemError;
use crate::logger::{self, LogTag};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Telegram user identifier
pub type UserId = u64;

/// Length of identifiers produced by /generate_random
pub const RANDOM_CODE_LENGTH: usize = 8;

// =============================================================================
// TYPES
// =============================================================================

/// Media kinds the bot can attach to a reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Document,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Document => "document",
            MediaKind::Video => "video",
        }
    }
}

/// Reference to previously uploaded media (opaque Telegram file handle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub file_id: String,
}

/// The text and/or media delivered upon successful redemption
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewardPayload {
    pub text: Option<String>,
    pub media: Option<MediaRef>,
}

impl RewardPayload {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            text: Some(message.into()),
            media: None,
        }
    }
}

/// Redemption state, tagged by cardinality mode
///
/// Single-use codes hold at most one redeemer; multi-use codes hold a set of
/// redeemers bounded by their limit. The tag replaces the original dynamic
/// "int or list" representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemptions {
    Single { redeemed: Option<UserId> },
    Multi { redeemed: HashSet<UserId>, limit: u32 },
}

impl Redemptions {
    pub fn single() -> Self {
        Redemptions::Single { redeemed: None }
    }

    pub fn multi(limit: u32) -> Self {
        Redemptions::Multi {
            redeemed: HashSet::new(),
            limit,
        }
    }

    /// Number of successful redemptions so far
    pub fn used_count(&self) -> u32 {
        match self {
            Redemptions::Single { redeemed } => redeemed.is_some() as u32,
            Redemptions::Multi { redeemed, .. } => redeemed.len() as u32,
        }
    }

    /// Maximum number of redemptions
    pub fn limit(&self) -> u32 {
        match self {
            Redemptions::Single { .. } => 1,
            Redemptions::Multi { limit, .. } => *limit,
        }
    }

    pub fn mode_str(&self) -> &'static str {
        match self {
            Redemptions::Single { .. } => "single-use",
            Redemptions::Multi { .. } => "multi-use",
        }
    }
}

/// A redeemable code record
#[derive(Debug, Clone)]
pub struct Code {
    pub identifier: String,
    pub redemptions: Redemptions,
    pub reward: RewardPayload,
    /// Admin that created the code; receives post-redemption notifications
    pub creator_id: UserId,
}

/// Read-only row for /listcodes and the status endpoints
#[derive(Debug, Clone)]
pub struct CodeSummary {
    pub identifier: String,
    pub mode: &'static str,
    pub used: u32,
    pub limit: u32,
}

/// Successful redemption result: what to deliver and whom to notify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redeemed {
    pub reward: RewardPayload,
    pub creator_id: UserId,
    pub used: u32,
    pub limit: u32,
}

// =============================================================================
// STORE
// =============================================================================

struct StoreInner {
    codes: HashMap<String, Code>,
    /// Insertion order of live identifiers, kept in lockstep with `codes`
    order: Vec<String>,
}

/// Mutex-guarded code store shared between the bot and the webserver
pub struct CodeStore {
    inner: Mutex<StoreInner>,
}

impl CodeStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                codes: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// Insert a new code
    ///
    /// Fails with DuplicateCode when the identifier is already live; the
    /// existing record is left untouched in that case.
    pub fn create(
        &self,
        identifier: &str,
        redemptions: Redemptions,
        reward: RewardPayload,
        creator_id: UserId,
    ) -> Result<(), RedeemError> {
        let mut inner = self.lock();

        if inner.codes.contains_key(identifier) {
            return Err(RedeemError::DuplicateCode {
                identifier: identifier.to_string(),
            });
        }

        logger::debug(
            LogTag::Store,
            &format!(
                "Created {} code '{}' (limit {})",
                redemptions.mode_str(),
                identifier,
                redemptions.limit()
            ),
        );

        inner.codes.insert(
            identifier.to_string(),
            Code {
                identifier: identifier.to_string(),
                redemptions,
                reward,
                creator_id,
            },
        );
        inner.order.push(identifier.to_string());

        Ok(())
    }

    /// Redeem a code for a user
    ///
    /// On success the user is recorded and the reward plus creator id is
    /// returned. Error cases, checked in order: UnknownCode, AlreadyRedeemed
    /// (repeat user, or single-use already consumed), LimitReached.
    pub fn redeem(&self, identifier: &str, user_id: UserId) -> Result<Redeemed, RedeemError> {
        let mut inner = self.lock();

        let code = inner
            .codes
            .get_mut(identifier)
            .ok_or_else(|| RedeemError::UnknownCode {
                identifier: identifier.to_string(),
            })?;

        match &mut code.redemptions {
            Redemptions::Single { redeemed } => {
                if redeemed.is_some() {
                    return Err(RedeemError::AlreadyRedeemed {
                        identifier: identifier.to_string(),
                    });
                }
                *redeemed = Some(user_id);
            }
            Redemptions::Multi { redeemed, limit } => {
                if redeemed.contains(&user_id) {
                    return Err(RedeemError::AlreadyRedeemed {
                        identifier: identifier.to_string(),
                    });
                }
                if redeemed.len() as u32 >= *limit {
                    return Err(RedeemError::LimitReached {
                        identifier: identifier.to_string(),
                        limit: *limit,
                    });
                }
                redeemed.insert(user_id);
            }
        }

        logger::debug(
            LogTag::Store,
            &format!(
                "Code '{}' redeemed by {} ({}/{})",
                identifier,
                user_id,
                code.redemptions.used_count(),
                code.redemptions.limit()
            ),
        );

        Ok(Redeemed {
            reward: code.reward.clone(),
            creator_id: code.creator_id,
            used: code.redemptions.used_count(),
            limit: code.redemptions.limit(),
        })
    }

    /// Remove a code irrevocably
    pub fn delete(&self, identifier: &str) -> Result<(), RedeemError> {
        let mut inner = self.lock();

        if inner.codes.remove(identifier).is_none() {
            return Err(RedeemError::UnknownCode {
                identifier: identifier.to_string(),
            });
        }
        inner.order.retain(|id| id != identifier);

        logger::debug(LogTag::Store, &format!("Deleted code '{}'", identifier));

        Ok(())
    }

    /// Snapshot of all codes in insertion order
    pub fn list(&self) -> Vec<CodeSummary> {
        let inner = self.lock();

        inner
            .order
            .iter()
            .filter_map(|id| inner.codes.get(id))
            .map(|code| CodeSummary {
                identifier: code.identifier.clone(),
                mode: code.redemptions.mode_str(),
                used: code.redemptions.used_count(),
                limit: code.redemptions.limit(),
            })
            .collect()
    }

    /// Number of distinct users that redeemed at least one code
    ///
    /// Derived on demand from the union of all redeemed sets; never stored.
    pub fn active_user_count(&self) -> usize {
        let inner = self.lock();

        let mut users: HashSet<UserId> = HashSet::new();
        for code in inner.codes.values() {
            match &code.redemptions {
                Redemptions::Single { redeemed } => {
                    if let Some(user) = redeemed {
                        users.insert(*user);
                    }
                }
                Redemptions::Multi { redeemed, .. } => {
                    users.extend(redeemed.iter().copied());
                }
            }
        }
        users.len()
    }

    /// Number of live codes
    pub fn len(&self) -> usize {
        self.lock().codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().codes.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        // A poisoned lock means a panic mid-mutation; propagating the panic
        // is the only sound option for in-memory state.
        self.inner.lock().expect("code store mutex poisoned")
    }
}

impl Default for CodeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a random 8-character uppercase alphanumeric identifier
pub fn generate_random_identifier() -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..RANDOM_CODE_LENGTH)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn single(store: &CodeStore, id: &str, message: &str) {
        store
            .create(id, Redemptions::single(), RewardPayload::text(message), 1000)
            .unwrap();
    }

    #[test]
    fn test_single_use_lifecycle() {
        let store = CodeStore::new();
        single(&store, "WELCOME1", "hi");

        let redeemed = store.redeem("WELCOME1", 42).unwrap();
        assert_eq!(redeemed.reward.text.as_deref(), Some("hi"));
        assert_eq!(redeemed.creator_id, 1000);

        // Same user again
        assert_eq!(
            store.redeem("WELCOME1", 42),
            Err(RedeemError::AlreadyRedeemed {
                identifier: "WELCOME1".to_string()
            })
        );

        // Different user - limit exhausted at 1
        assert_eq!(
            store.redeem("WELCOME1", 7),
            Err(RedeemError::AlreadyRedeemed {
                identifier: "WELCOME1".to_string()
            })
        );
    }

    #[test]
    fn test_multi_use_limit() {
        let store = CodeStore::new();
        store
            .create(
                "BONUS",
                Redemptions::multi(2),
                RewardPayload::text("bonus"),
                1000,
            )
            .unwrap();

        assert!(store.redeem("BONUS", 1).is_ok());
        assert!(store.redeem("BONUS", 2).is_ok());
        assert_eq!(
            store.redeem("BONUS", 3),
            Err(RedeemError::LimitReached {
                identifier: "BONUS".to_string(),
                limit: 2
            })
        );

        // Invariant: used never exceeds limit
        let listing = store.list();
        assert_eq!(listing[0].used, 2);
        assert_eq!(listing[0].limit, 2);
    }

    #[test]
    fn test_multi_use_double_redemption() {
        let store = CodeStore::new();
        store
            .create(
                "BONUS",
                Redemptions::multi(5),
                RewardPayload::text("bonus"),
                1000,
            )
            .unwrap();

        assert!(store.redeem("BONUS", 1).is_ok());
        assert_eq!(
            store.redeem("BONUS", 1),
            Err(RedeemError::AlreadyRedeemed {
                identifier: "BONUS".to_string()
            })
        );
        // The failed attempt must not consume a slot
        assert_eq!(store.list()[0].used, 1);
    }

    #[test]
    fn test_unknown_code_never_mutates() {
        let store = CodeStore::new();
        single(&store, "REAL", "hi");

        assert_eq!(
            store.redeem("GHOST", 42),
            Err(RedeemError::UnknownCode {
                identifier: "GHOST".to_string()
            })
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_user_count(), 0);
    }

    #[test]
    fn test_duplicate_create_leaves_original() {
        let store = CodeStore::new();
        single(&store, "WELCOME1", "original");

        let result = store.create(
            "WELCOME1",
            Redemptions::multi(10),
            RewardPayload::text("replacement"),
            2000,
        );
        assert_eq!(
            result,
            Err(RedeemError::DuplicateCode {
                identifier: "WELCOME1".to_string()
            })
        );

        let redeemed = store.redeem("WELCOME1", 42).unwrap();
        assert_eq!(redeemed.reward.text.as_deref(), Some("original"));
        assert_eq!(redeemed.creator_id, 1000);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete() {
        let store = CodeStore::new();
        single(&store, "A", "a");
        single(&store, "B", "b");

        store.delete("A").unwrap();
        assert_eq!(store.len(), 1);

        assert_eq!(
            store.delete("GHOST"),
            Err(RedeemError::UnknownCode {
                identifier: "GHOST".to_string()
            })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_active_user_count_is_a_set_union() {
        let store = CodeStore::new();
        single(&store, "A", "a");
        single(&store, "B", "b");
        store
            .create("C", Redemptions::multi(3), RewardPayload::text("c"), 1000)
            .unwrap();

        // User 42 redeems two distinct codes - counted once
        store.redeem("A", 42).unwrap();
        store.redeem("C", 42).unwrap();
        store.redeem("B", 7).unwrap();
        store.redeem("C", 8).unwrap();

        assert_eq!(store.active_user_count(), 3);
    }

    #[test]
    fn test_list_follows_insertion_order() {
        let store = CodeStore::new();
        single(&store, "ZULU", "z");
        single(&store, "ALPHA", "a");
        single(&store, "MIKE", "m");
        store.delete("ALPHA").unwrap();
        single(&store, "ALPHA", "a2");

        let ids: Vec<String> = store.list().into_iter().map(|c| c.identifier).collect();
        assert_eq!(ids, vec!["ZULU", "MIKE", "ALPHA"]);
    }

    #[test]
    fn test_limit_invariant_under_redeem_sequences() {
        let store = CodeStore::new();
        store
            .create("X", Redemptions::multi(3), RewardPayload::text("x"), 1)
            .unwrap();

        for user in 0..50u64 {
            let _ = store.redeem("X", user);
            let row = &store.list()[0];
            assert!(row.used <= row.limit);
        }
        assert_eq!(store.list()[0].used, 3);
    }

    #[test]
    fn test_reward_media_round_trip() {
        let store = CodeStore::new();
        store
            .create(
                "PIC",
                Redemptions::single(),
                RewardPayload {
                    text: Some("enjoy".to_string()),
                    media: Some(MediaRef {
                        kind: MediaKind::Photo,
                        file_id: "file-123".to_string(),
                    }),
                },
                1000,
            )
            .unwrap();

        let redeemed = store.redeem("PIC", 5).unwrap();
        let media = redeemed.reward.media.unwrap();
        assert_eq!(media.kind, MediaKind::Photo);
        assert_eq!(media.file_id, "file-123");
    }

    #[test]
    fn test_random_identifier_shape() {
        for _ in 0..20 {
            let id = generate_random_identifier();
            assert_eq!(id.len(), RANDOM_CODE_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}

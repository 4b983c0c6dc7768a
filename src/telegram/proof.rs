//! Pending proof requests
//!
//! Ephemeral per-user state for the screenshot-verification flow: created
//! when a redeeming user taps "Submit proof", consumed by their next photo
//! or by cancellation. Never persisted; lost on restart by design.
//!
//! Also holds the last-reward-message scratch value used to thread the proof
//! prompt beneath the delivered reward.

use crate::store::UserId;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;
use teloxide::types::MessageId;

/// A user's outstanding proof request
#[derive(Debug, Clone)]
pub struct PendingProof {
    pub identifier: String,
    /// Creator the screenshot is forwarded to
    pub creator_id: UserId,
    pub created_at: Instant,
}

/// Tracker for pending proof requests and reward-message threading
pub struct ProofTracker {
    pending: Mutex<HashMap<UserId, PendingProof>>,
    last_reward_message: Mutex<HashMap<UserId, MessageId>>,
}

impl ProofTracker {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            last_reward_message: Mutex::new(HashMap::new()),
        }
    }

    /// Open a proof request, replacing any previous one for this user
    pub fn open(&self, user_id: UserId, identifier: String, creator_id: UserId) {
        let mut pending = self.pending.lock().expect("proof mutex poisoned");
        pending.insert(
            user_id,
            PendingProof {
                identifier,
                creator_id,
                created_at: Instant::now(),
            },
        );
    }

    /// Consume the user's pending request, if any
    pub fn take(&self, user_id: UserId) -> Option<PendingProof> {
        let mut pending = self.pending.lock().expect("proof mutex poisoned");
        pending.remove(&user_id)
    }

    /// Cancel a pending request; true when one existed
    pub fn cancel(&self, user_id: UserId) -> bool {
        self.take(user_id).is_some()
    }

    pub fn has_pending(&self, user_id: UserId) -> bool {
        let pending = self.pending.lock().expect("proof mutex poisoned");
        pending.contains_key(&user_id)
    }

    /// Remember which message delivered the user's reward
    pub fn set_last_reward_message(&self, user_id: UserId, message_id: MessageId) {
        let mut map = self
            .last_reward_message
            .lock()
            .expect("proof mutex poisoned");
        map.insert(user_id, message_id);
    }

    /// The message to thread the proof prompt beneath
    pub fn last_reward_message(&self, user_id: UserId) -> Option<MessageId> {
        let map = self
            .last_reward_message
            .lock()
            .expect("proof mutex poisoned");
        map.get(&user_id).copied()
    }
}

impl Default for ProofTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_take_consumes() {
        let tracker = ProofTracker::new();
        tracker.open(42, "WELCOME1".to_string(), 1000);

        assert!(tracker.has_pending(42));
        let proof = tracker.take(42).unwrap();
        assert_eq!(proof.identifier, "WELCOME1");
        assert_eq!(proof.creator_id, 1000);

        // Consumed - a second photo finds nothing
        assert!(tracker.take(42).is_none());
    }

    #[test]
    fn test_cancel() {
        let tracker = ProofTracker::new();
        assert!(!tracker.cancel(42));

        tracker.open(42, "X".to_string(), 1);
        assert!(tracker.cancel(42));
        assert!(!tracker.has_pending(42));
    }

    #[test]
    fn test_reopen_replaces() {
        let tracker = ProofTracker::new();
        tracker.open(42, "FIRST".to_string(), 1);
        tracker.open(42, "SECOND".to_string(), 2);

        let proof = tracker.take(42).unwrap();
        assert_eq!(proof.identifier, "SECOND");
    }

    #[test]
    fn test_last_reward_message_scratch() {
        let tracker = ProofTracker::new();
        assert!(tracker.last_reward_message(42).is_none());

        tracker.set_last_reward_message(42, MessageId(7));
        assert_eq!(tracker.last_reward_message(42), Some(MessageId(7)));
    }
}

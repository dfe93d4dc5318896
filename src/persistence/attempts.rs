//! Failed-login bookkeeping, keyed per username
//!
//! Kept apart from the account records so a lock survives reloads without
//! touching the user list.

use crate::platform::KeyValueStore;

/// Consecutive failures and an optional lock expiry (epoch ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginAttemptRecord {
    pub attempts: u32,
    pub lock_until: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AttemptStore<S> {
    storage: S,
}

impl<S: KeyValueStore> AttemptStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn attempts_key(username: &str) -> String {
        format!("attempts_{}", username)
    }

    fn lock_key(username: &str) -> String {
        format!("lock_{}", username)
    }

    /// Current record; unreadable or zero values count as absent
    pub fn load(&self, username: &str) -> LoginAttemptRecord {
        let attempts = self
            .storage
            .get_item(&Self::attempts_key(username))
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let lock_until = self
            .storage
            .get_item(&Self::lock_key(username))
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&t| t > 0);

        LoginAttemptRecord {
            attempts,
            lock_until,
        }
    }

    pub fn store(&self, username: &str, record: LoginAttemptRecord) {
        self.storage
            .set_item(&Self::attempts_key(username), &record.attempts.to_string());
        match record.lock_until {
            Some(until) => self
                .storage
                .set_item(&Self::lock_key(username), &until.to_string()),
            None => self.storage.remove_item(&Self::lock_key(username)),
        }
    }

    /// Forget all failures for a username
    pub fn clear(&self, username: &str) {
        self.storage.remove_item(&Self::attempts_key(username));
        self.storage.remove_item(&Self::lock_key(username));
    }
}

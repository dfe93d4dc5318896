//! Registration and login gate
//!
//! Per-username state machine driven by login attempts:
//! `Unlocked(attempts)` until `max_attempts` consecutive failures, then
//! `Locked(until)` for `lock_duration_secs`. The remaining lock time is
//! always derived from the stored expiry, never counted down separately.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{AttemptStore, LoginAttemptRecord, User, UserStore};
use crate::platform::KeyValueStore;

/// Lockout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPolicy {
    /// Consecutive failures that trigger a lock
    pub max_attempts: u32,
    /// Lock length in seconds
    pub lock_duration_secs: u64,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_duration_secs: 60,
        }
    }
}

/// Why a registration or login was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    Validation,
    #[error("Username already exists")]
    DuplicateUser,
    #[error("Invalid credentials ({attempts}/{max})")]
    InvalidCredentials { attempts: u32, max: u32 },
    #[error("Too many attempts. Try again in {seconds_remaining} seconds")]
    Locked { seconds_remaining: u64 },
}

/// Lock state of a single username at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked { attempts: u32 },
    Locked { until_ms: u64 },
}

/// Whole seconds left until `until_ms`, rounded up
fn seconds_until(until_ms: u64, now_ms: u64) -> u64 {
    until_ms.saturating_sub(now_ms).div_ceil(1000)
}

#[derive(Debug, Clone)]
pub struct AuthGate<S> {
    users: UserStore<S>,
    attempts: AttemptStore<S>,
    policy: AuthPolicy,
}

impl<S: KeyValueStore + Clone> AuthGate<S> {
    pub fn new(storage: S, policy: AuthPolicy) -> Self {
        Self {
            users: UserStore::new(storage.clone()),
            attempts: AttemptStore::new(storage),
            policy,
        }
    }
}

impl<S: KeyValueStore> AuthGate<S> {
    pub fn policy(&self) -> AuthPolicy {
        self.policy
    }

    pub fn users(&self) -> &UserStore<S> {
        &self.users
    }

    /// Create an account with zeroed stats
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation);
        }

        let mut users = self.users.list_users();
        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::DuplicateUser);
        }

        users.push(User::new(username, password));
        self.users.save_users(&users);
        log::info!("Registered user {}", username);
        Ok(())
    }

    /// Attempt a login at `now_ms` (epoch milliseconds)
    pub fn login(&self, username: &str, password: &str, now_ms: u64) -> Result<(), AuthError> {
        let username = username.trim();
        let password = password.trim();

        let mut record = self.attempts.load(username);

        if let Some(until) = record.lock_until {
            if now_ms >= until {
                log::debug!("Lock expired for {}", username);
                self.attempts.clear(username);
                record = LoginAttemptRecord::default();
            } else {
                return Err(AuthError::Locked {
                    seconds_remaining: seconds_until(until, now_ms),
                });
            }
        }

        let matched = self
            .users
            .list_users()
            .iter()
            .any(|u| u.username == username && u.password == password);

        if matched {
            self.attempts.clear(username);
            self.users.set_current_user(username);
            log::info!("User {} logged in", username);
            return Ok(());
        }

        record.attempts += 1;
        if record.attempts >= self.policy.max_attempts {
            record.lock_until = Some(now_ms + self.policy.lock_duration_secs * 1000);
            self.attempts.store(username, record);
            log::warn!(
                "Locked {} for {}s after {} failed attempts",
                username,
                self.policy.lock_duration_secs,
                record.attempts
            );
            return Err(AuthError::Locked {
                seconds_remaining: self.policy.lock_duration_secs,
            });
        }

        self.attempts.store(username, record);
        Err(AuthError::InvalidCredentials {
            attempts: record.attempts,
            max: self.policy.max_attempts,
        })
    }

    /// End the session
    pub fn logout(&self) {
        if let Some(user) = self.users.current_user() {
            log::info!("User {} logged out", user);
        }
        self.users.clear_current_user();
    }

    pub fn lock_state(&self, username: &str, now_ms: u64) -> LockState {
        let record = self.attempts.load(username.trim());
        match record.lock_until {
            Some(until) if now_ms < until => LockState::Locked { until_ms: until },
            Some(_) => LockState::Unlocked { attempts: 0 },
            None => LockState::Unlocked {
                attempts: record.attempts,
            },
        }
    }

    /// Countdown value for the lock message; `None` when not locked
    pub fn seconds_remaining(&self, username: &str, now_ms: u64) -> Option<u64> {
        match self.lock_state(username, now_ms) {
            LockState::Locked { until_ms } => Some(seconds_until(until_ms, now_ms)),
            LockState::Unlocked { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    const T0: u64 = 1_700_000_000_000;

    fn gate() -> (AuthGate<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (AuthGate::new(storage.clone(), AuthPolicy::default()), storage)
    }

    #[test]
    fn test_register_creates_zeroed_user() {
        let (gate, _) = gate();
        gate.register("  alice ", " secret ").unwrap();

        let user = gate.users().find_user("alice").unwrap();
        assert_eq!(user.password, "secret");
        assert_eq!(user.score, 0);
        assert_eq!(user.games_played, 0);
    }

    #[test]
    fn test_register_duplicate() {
        let (gate, _) = gate();
        gate.register("alice", "pw").unwrap();
        assert_eq!(gate.register("alice", "other"), Err(AuthError::DuplicateUser));
        // Case-sensitive
        assert!(gate.register("Alice", "pw").is_ok());
        assert_eq!(gate.users().list_users().len(), 2);
    }

    #[test]
    fn test_register_empty_fields_writes_nothing() {
        let (gate, storage) = gate();
        assert_eq!(gate.register("alice", ""), Err(AuthError::Validation));
        assert_eq!(gate.register("   ", "pw"), Err(AuthError::Validation));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_login_success_sets_session() {
        let (gate, storage) = gate();
        gate.register("alice", "pw").unwrap();
        assert_eq!(
            gate.login("alice", "bad", T0),
            Err(AuthError::InvalidCredentials { attempts: 1, max: 3 })
        );

        gate.login("alice", "pw", T0).unwrap();
        assert_eq!(gate.users().current_user().as_deref(), Some("alice"));
        assert_eq!(storage.get_item("attempts_alice"), None);
        assert_eq!(gate.lock_state("alice", T0), LockState::Unlocked { attempts: 0 });
    }

    #[test]
    fn test_lockout_sequence() {
        let (gate, storage) = gate();
        gate.register("alice", "pw").unwrap();

        assert_eq!(
            gate.login("alice", "x", T0),
            Err(AuthError::InvalidCredentials { attempts: 1, max: 3 })
        );
        assert_eq!(
            gate.login("alice", "x", T0 + 1_000),
            Err(AuthError::InvalidCredentials { attempts: 2, max: 3 })
        );
        assert_eq!(
            gate.login("alice", "x", T0 + 2_000),
            Err(AuthError::Locked { seconds_remaining: 60 })
        );

        // Locked: even the right password is rejected, no attempt consumed
        assert_eq!(
            gate.login("alice", "pw", T0 + 12_500),
            Err(AuthError::Locked { seconds_remaining: 50 })
        );
        assert_eq!(storage.get_item("attempts_alice").as_deref(), Some("3"));
        assert_eq!(gate.users().current_user(), None);
    }

    #[test]
    fn test_lock_expiry_resets_counter() {
        let (gate, _) = gate();
        gate.register("alice", "pw").unwrap();
        for i in 0..3 {
            let _ = gate.login("alice", "x", T0 + i);
        }
        let until = T0 + 2 + 60_000;
        assert_eq!(gate.lock_state("alice", until - 1), LockState::Locked { until_ms: until });

        // Fresh evaluation after the window: counter starts from zero
        assert_eq!(
            gate.login("alice", "x", until),
            Err(AuthError::InvalidCredentials { attempts: 1, max: 3 })
        );
        assert_eq!(gate.seconds_remaining("alice", until), None);
    }

    #[test]
    fn test_countdown_is_recomputed() {
        let (gate, _) = gate();
        for _ in 0..3 {
            let _ = gate.login("ghost", "x", T0);
        }
        assert_eq!(gate.seconds_remaining("ghost", T0), Some(60));
        assert_eq!(gate.seconds_remaining("ghost", T0 + 59_001), Some(1));
        // A long pause jumps straight past the end
        assert_eq!(gate.seconds_remaining("ghost", T0 + 600_000), None);
    }

    #[test]
    fn test_lock_is_per_username() {
        let (gate, _) = gate();
        gate.register("bob", "pw").unwrap();
        for _ in 0..3 {
            let _ = gate.login("alice", "x", T0);
        }
        assert!(gate.login("bob", "pw", T0).is_ok());
    }

    #[test]
    fn test_logout() {
        let (gate, _) = gate();
        gate.register("alice", "pw").unwrap();
        gate.login("alice", "pw", T0).unwrap();
        gate.logout();
        assert_eq!(gate.users().current_user(), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials { attempts: 2, max: 3 }.to_string(),
            "Invalid credentials (2/3)"
        );
        assert_eq!(
            AuthError::Locked { seconds_remaining: 42 }.to_string(),
            "Too many attempts. Try again in 42 seconds"
        );
    }
}

//! Registered users and the session pointer

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, case-sensitive
    pub username: String,
    /// Stored and compared as plaintext
    pub password: String,
    /// Cumulative points over all games
    #[serde(default)]
    pub score: u64,
    /// Completed sessions
    #[serde(default)]
    pub games_played: u32,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            score: 0,
            games_played: 0,
        }
    }
}

/// Read-modify-write access to the user list and current user
#[derive(Debug, Clone)]
pub struct UserStore<S> {
    storage: S,
}

impl<S: KeyValueStore> UserStore<S> {
    const USERS_KEY: &'static str = "users";
    const CURRENT_USER_KEY: &'static str = "currentUser";

    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying storage handle
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All registered users (empty if none stored or the value is corrupt)
    pub fn list_users(&self) -> Vec<User> {
        let Some(json) = self.storage.get_item(Self::USERS_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str::<Option<Vec<User>>>(&json) {
            Ok(users) => users.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring unreadable user list: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the whole user list
    pub fn save_users(&self, users: &[User]) {
        match serde_json::to_string(users) {
            Ok(json) => {
                self.storage.set_item(Self::USERS_KEY, &json);
                log::debug!("Saved {} users", users.len());
            }
            Err(e) => log::error!("Failed to serialize users: {}", e),
        }
    }

    /// Look up a user by exact username
    pub fn find_user(&self, username: &str) -> Option<User> {
        self.list_users()
            .into_iter()
            .find(|u| u.username == username)
    }

    /// Username of the logged-in user, if any
    pub fn current_user(&self) -> Option<String> {
        self.storage.get_item(Self::CURRENT_USER_KEY)
    }

    pub fn set_current_user(&self, username: &str) {
        self.storage.set_item(Self::CURRENT_USER_KEY, username);
    }

    pub fn clear_current_user(&self) {
        self.storage.remove_item(Self::CURRENT_USER_KEY);
    }

    /// The logged-in user's record; a dangling pointer resolves to `None`
    pub fn current_user_record(&self) -> Option<User> {
        let username = self.current_user()?;
        self.find_user(&username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    fn store() -> UserStore<MemoryStorage> {
        UserStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_empty_store() {
        let store = store();
        assert!(store.list_users().is_empty());
        assert_eq!(store.current_user(), None);
        assert_eq!(store.current_user_record(), None);
    }

    #[test]
    fn test_save_and_list() {
        let store = store();
        store.save_users(&[User::new("alice", "pw"), User::new("bob", "pw2")]);

        let users = store.list_users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].username, "bob");
        assert_eq!(store.find_user("alice").map(|u| u.password), Some("pw".into()));
        // Case-sensitive lookup
        assert_eq!(store.find_user("Alice"), None);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let store = store();
        store.save_users(&[User::new("alice", "pw")]);
        let json = store.storage().get_item("users").unwrap();
        assert!(json.contains("\"gamesPlayed\":0"));
        assert!(json.contains("\"username\":\"alice\""));
    }

    #[test]
    fn test_legacy_records_default_stats() {
        let store = store();
        store
            .storage()
            .set_item("users", r#"[{"username":"alice","password":"pw"}]"#);

        let user = store.find_user("alice").unwrap();
        assert_eq!(user.score, 0);
        assert_eq!(user.games_played, 0);
    }

    #[test]
    fn test_corrupt_users_reads_as_empty() {
        let store = store();
        store.storage().set_item("users", "{not json");
        assert!(store.list_users().is_empty());

        store.storage().set_item("users", "null");
        assert!(store.list_users().is_empty());
    }

    #[test]
    fn test_session_pointer() {
        let store = store();
        store.save_users(&[User::new("alice", "pw")]);

        store.set_current_user("alice");
        assert_eq!(store.current_user().as_deref(), Some("alice"));
        assert_eq!(
            store.current_user_record().map(|u| u.username),
            Some("alice".into())
        );

        store.set_current_user("ghost");
        assert_eq!(store.current_user_record(), None);

        store.clear_current_user();
        assert_eq!(store.current_user(), None);
    }
}

//! Crediting finished sessions to the logged-in user
//!
//! Both games report through [`ScoreSink`]; the persistent implementation
//! is [`ScoreRecorder`], which adds to the user's running totals.

use crate::persistence::{User, UserStore};
use crate::platform::KeyValueStore;

/// Receives the points of each completed session
pub trait ScoreSink {
    fn record(&mut self, points: u32);
}

/// Writes session results into the current user's record
#[derive(Debug, Clone)]
pub struct ScoreRecorder<S> {
    users: UserStore<S>,
}

impl<S: KeyValueStore> ScoreRecorder<S> {
    pub fn new(storage: S) -> Self {
        Self {
            users: UserStore::new(storage),
        }
    }

    pub fn users(&self) -> &UserStore<S> {
        &self.users
    }

    /// Add `points` and one game to the current user.
    /// Returns the updated record, or `None` when nobody is logged in.
    pub fn record_points(&self, points: u32) -> Option<User> {
        let Some(username) = self.users.current_user() else {
            log::debug!("No current user, {} points not recorded", points);
            return None;
        };

        let mut users = self.users.list_users();
        let Some(user) = users.iter_mut().find(|u| u.username == username) else {
            log::warn!("Current user {} is not registered", username);
            return None;
        };

        user.score += u64::from(points);
        user.games_played += 1;
        let updated = user.clone();

        self.users.save_users(&users);
        log::info!(
            "{} scored {} (total {}, games {})",
            updated.username,
            points,
            updated.score,
            updated.games_played
        );
        Some(updated)
    }
}

impl<S: KeyValueStore> ScoreSink for ScoreRecorder<S> {
    fn record(&mut self, points: u32) {
        self.record_points(points);
    }
}

/// Collects recorded points in memory
impl ScoreSink for Vec<u32> {
    fn record(&mut self, points: u32) {
        self.push(points);
    }
}

/// Hub panel numbers for the logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubSummary {
    pub username: String,
    pub score: u64,
    pub games_played: u32,
}

impl HubSummary {
    pub fn load<S: KeyValueStore>(users: &UserStore<S>) -> Option<Self> {
        users.current_user_record().map(|u| Self {
            username: u.username,
            score: u.score,
            games_played: u.games_played,
        })
    }
}

//! Arcade Hub - catch and memory mini-games behind a local login gate
//!
//! Core modules:
//! - `sim`: Deterministic game engines (scheduler, catch, memory)
//! - `auth`: Registration and login with timed lockout
//! - `persistence`: Users, session pointer and login attempts
//! - `scores`: Crediting finished sessions to the current user
//! - `platform`: Browser/native storage and time
//! - `settings`: Persisted tuning

pub mod auth;
pub mod persistence;
pub mod platform;
pub mod scores;
pub mod settings;
pub mod sim;

pub use auth::{AuthError, AuthGate, AuthPolicy, LockState};
pub use persistence::{User, UserStore};
pub use scores::{HubSummary, ScoreRecorder, ScoreSink};
pub use settings::Settings;

use platform::KeyValueStore;
use sim::{CatchEngine, MemoryEngine};

/// Everything a page needs, sharing one storage handle
#[derive(Debug, Clone)]
pub struct Arcade<S> {
    storage: S,
    settings: Settings,
    auth: AuthGate<S>,
}

impl<S: KeyValueStore + Clone> Arcade<S> {
    /// Open the hub on `storage`, loading saved settings
    pub fn open(storage: S) -> Self {
        let settings = Settings::load(&storage);
        let auth = AuthGate::new(storage.clone(), settings.auth);
        Self {
            storage,
            settings,
            auth,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn auth(&self) -> &AuthGate<S> {
        &self.auth
    }

    /// Catch game crediting the current user
    pub fn catch_engine(&self, seed: u64) -> CatchEngine<ScoreRecorder<S>> {
        CatchEngine::new(
            self.settings.catch.clone(),
            seed,
            ScoreRecorder::new(self.storage.clone()),
        )
    }

    /// Memory game crediting the current user
    pub fn memory_engine(&self, seed: u64) -> MemoryEngine<ScoreRecorder<S>> {
        MemoryEngine::new(
            self.settings.memory,
            seed,
            ScoreRecorder::new(self.storage.clone()),
        )
    }

    /// Hub panel data for the logged-in user
    pub fn summary(&self) -> Option<HubSummary> {
        HubSummary::load(self.auth.users())
    }
}

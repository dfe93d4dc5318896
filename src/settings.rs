//! Hub settings
//!
//! Persisted in the key-value store next to the account data.

use serde::{Deserialize, Serialize};

use crate::auth::AuthPolicy;
use crate::platform::KeyValueStore;
use crate::sim::{CatchConfig, MemoryTiming};

/// Tunables for the login gate and both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Lockout policy
    #[serde(default)]
    pub auth: AuthPolicy,
    /// Catch game field geometry and pacing
    #[serde(default)]
    pub catch: CatchConfig,
    /// Memory game reveal and level delays
    #[serde(default)]
    pub memory: MemoryTiming,
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "arcade_settings";

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(storage: &impl KeyValueStore) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &impl KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}

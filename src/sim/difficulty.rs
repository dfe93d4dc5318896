//! Difficulty levels shared by both games
//!
//! Each game keeps its own profile schema; this only names the levels and
//! their fixed progression order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Result of stepping to the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAdvance {
    Next(Difficulty),
    AllLevelsComplete,
}

impl Difficulty {
    /// Progression order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Following level; never wraps past `Hard`
    pub fn next(&self) -> LevelAdvance {
        match self {
            Difficulty::Easy => LevelAdvance::Next(Difficulty::Medium),
            Difficulty::Medium => LevelAdvance::Next(Difficulty::Hard),
            Difficulty::Hard => LevelAdvance::AllLevelsComplete,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next() == LevelAdvance::AllLevelsComplete
    }
}

//! Memory game state and tuning

use serde::{Deserialize, Serialize};

use crate::sim::difficulty::Difficulty;

/// Elapsed-time refresh period
pub const TIMER_INTERVAL_MS: u64 = 1000;

/// Board shape for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryProfile {
    pub pairs: usize,
    /// Grid width for layout
    pub columns: usize,
    /// Awarded when the board is cleared
    pub points: u32,
}

impl MemoryProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                pairs: 6,
                columns: 4,
                points: 10,
            },
            Difficulty::Medium => Self {
                pairs: 8,
                columns: 4,
                points: 20,
            },
            Difficulty::Hard => Self {
                pairs: 12,
                columns: 6,
                points: 30,
            },
        }
    }
}

/// Reveal and level delays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryTiming {
    /// How long a mismatched pair stays face up
    pub mismatch_delay_ms: u64,
    /// Pause before the next level starts
    pub level_advance_delay_ms: u64,
}

impl Default for MemoryTiming {
    fn default() -> Self {
        Self {
            mismatch_delay_ms: 700,
            level_advance_delay_ms: 1400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Flipped,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: usize,
    pub symbol: &'static str,
    pub state: CardState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPhase {
    Idle,
    Running,
    LevelComplete,
    /// Hard cleared; nothing further
    AllLevelsComplete,
}

/// What a flip did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Board locked, card not hidden, or no session
    Ignored,
    /// First card of the turn
    Revealed,
    Matched,
    /// Pair will turn back over after the mismatch delay
    Mismatched,
    /// Last pair found
    LevelComplete,
}

#[derive(Debug, Clone)]
pub struct MemoryState {
    pub phase: MemoryPhase,
    pub difficulty: Difficulty,
    pub profile: MemoryProfile,
    pub cards: Vec<Card>,
    /// Cards revealed this turn
    pub first: Option<usize>,
    pub second: Option<usize>,
    /// Set while a pair is being compared or shown
    pub locked: bool,
    pub moves: u32,
    pub pairs_found: usize,
    pub elapsed_secs: u64,
    pub(crate) started_at_ms: u64,
}

impl Default for MemoryState {
    fn default() -> Self {
        let difficulty = Difficulty::default();
        Self {
            phase: MemoryPhase::Idle,
            difficulty,
            profile: MemoryProfile::for_difficulty(difficulty),
            cards: Vec::new(),
            first: None,
            second: None,
            locked: false,
            moves: 0,
            pairs_found: 0,
            elapsed_secs: 0,
            started_at_ms: 0,
        }
    }
}

impl MemoryState {
    pub fn total_pairs(&self) -> usize {
        self.profile.pairs
    }

    /// Fraction of pairs found, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        if self.profile.pairs == 0 {
            return 0.0;
        }
        self.pairs_found as f32 / self.profile.pairs as f32
    }

    /// Close the current turn and unlock the board
    pub fn reset_turn(&mut self) {
        self.first = None;
        self.second = None;
        self.locked = false;
    }
}

//! Catch game state and tuning

use serde::{Deserialize, Serialize};

use crate::sim::collision::Rect;
use crate::sim::difficulty::Difficulty;

/// Lives at the start of every session
pub const START_LIVES: u8 = 3;

/// Countdown period
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;

/// Pacing for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchProfile {
    /// Session length in seconds
    pub duration_secs: u32,
    /// Delay between spawns
    pub spawn_interval_ms: u64,
    /// Fall speed range, pixels per frame
    pub speed_min: f32,
    pub speed_max: f32,
    /// Probability that a spawned drop is bad
    pub bad_chance: f64,
}

impl CatchProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                duration_secs: 60,
                spawn_interval_ms: 900,
                speed_min: 2.0,
                speed_max: 3.2,
                bad_chance: 0.15,
            },
            Difficulty::Medium => Self {
                duration_secs: 45,
                spawn_interval_ms: 650,
                speed_min: 2.6,
                speed_max: 4.1,
                bad_chance: 0.22,
            },
            Difficulty::Hard => Self {
                duration_secs: 35,
                spawn_interval_ms: 480,
                speed_min: 3.2,
                speed_max: 5.2,
                bad_chance: 0.30,
            },
        }
    }
}

/// Field geometry and frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the player and the bottom edge
    pub player_margin: f32,
    /// Horizontal pixels per frame while a direction is held
    pub player_speed: f32,
    /// Drops are square
    pub drop_size: f32,
    /// Spawn height (above the visible field)
    pub spawn_y: f32,
    /// How far below the field a drop may fall before it is discarded
    pub despawn_margin: f32,
    pub frame_interval_ms: u64,
    /// Pause before the next level starts
    pub next_level_delay_ms: u64,
}

impl Default for CatchConfig {
    fn default() -> Self {
        Self {
            field_width: 480.0,
            field_height: 520.0,
            player_width: 90.0,
            player_height: 18.0,
            player_margin: 10.0,
            player_speed: 7.0,
            drop_size: 24.0,
            spawn_y: -30.0,
            despawn_margin: 40.0,
            frame_interval_ms: 16,
            next_level_delay_ms: 1200,
        }
    }
}

impl CatchConfig {
    /// Rightmost x the player may reach
    pub fn player_max_x(&self) -> f32 {
        (self.field_width - self.player_width).max(0.0)
    }

    /// Player rectangle centred horizontally near the bottom edge
    pub fn centered_player(&self) -> Rect {
        Rect::new(
            (self.field_width / 2.0 - self.player_width / 2.0).max(0.0),
            self.field_height - self.player_height - self.player_margin,
            self.player_width,
            self.player_height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropKind {
    /// Caught for a point
    Good,
    /// Costs a life
    Bad,
}

/// A falling object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingDrop {
    pub id: u32,
    pub rect: Rect,
    /// Pixels per frame
    pub speed: f32,
    pub kind: DropKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchPhase {
    Idle,
    Running,
    /// `time_up` is false when the session ended on lives
    Ended { time_up: bool },
}

/// Held direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatchInput {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct CatchState {
    pub phase: CatchPhase,
    pub difficulty: Difficulty,
    pub profile: CatchProfile,
    pub score: u32,
    pub lives: u8,
    /// Seconds left on the countdown
    pub time_left: u32,
    pub player: Rect,
    pub drops: Vec<FallingDrop>,
    pub input: CatchInput,
    next_id: u32,
}

impl CatchState {
    pub fn new(config: &CatchConfig) -> Self {
        let difficulty = Difficulty::default();
        let profile = CatchProfile::for_difficulty(difficulty);
        Self {
            phase: CatchPhase::Idle,
            difficulty,
            profile,
            score: 0,
            lives: START_LIVES,
            time_left: profile.duration_secs,
            player: config.centered_player(),
            drops: Vec::new(),
            input: CatchInput::default(),
            next_id: 1,
        }
    }

    /// Fresh session values for `difficulty`
    pub fn reset(&mut self, difficulty: Difficulty, config: &CatchConfig) {
        self.difficulty = difficulty;
        self.profile = CatchProfile::for_difficulty(difficulty);
        self.score = 0;
        self.lives = START_LIVES;
        self.time_left = self.profile.duration_secs;
        self.player = config.centered_player();
        self.drops.clear();
        self.input = CatchInput::default();
    }

    /// Allocate a new drop ID
    pub fn next_drop_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

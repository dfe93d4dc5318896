//! Deterministic game simulation
//!
//! All gameplay logic lives here. It must stay free of rendering and
//! platform calls:
//! - Virtual time only (advanced by the host through each engine)
//! - Seeded RNG only
//! - Stable event order (due time, then scheduling order)

pub mod catch;
pub mod collision;
pub mod difficulty;
pub mod memory;
pub mod scheduler;

pub use catch::{
    CatchConfig, CatchEngine, CatchInput, CatchPhase, CatchProfile, CatchState, DropKind, FallingDrop,
};
pub use collision::Rect;
pub use difficulty::{Difficulty, LevelAdvance};
pub use memory::{
    Card, CardState, FlipOutcome, MemoryEngine, MemoryPhase, MemoryProfile, MemoryState,
    MemoryTiming,
};
pub use scheduler::{Scheduler, TimerId};

//! Per-event catch game updates
//!
//! Each function handles one kind of scheduled callback. They only touch
//! the state they are given; session bookkeeping lives in the engine.

use rand::Rng;

use super::state::{CatchConfig, CatchState, DropKind, FallingDrop};
use crate::sim::collision::Rect;

/// What a frame did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    LivesExhausted,
}

/// One second off the clock. Returns true when time has run out.
pub fn countdown(state: &mut CatchState) -> bool {
    state.time_left = state.time_left.saturating_sub(1);
    state.time_left == 0
}

/// Add one drop at a random column above the field
pub fn spawn_drop(state: &mut CatchState, config: &CatchConfig, rng: &mut impl Rng) {
    let profile = state.profile;
    let max_x = (config.field_width - config.drop_size).max(0.0);
    let x = rng.random_range(0.0..=max_x);
    let speed = if profile.speed_max > profile.speed_min {
        rng.random_range(profile.speed_min..=profile.speed_max)
    } else {
        profile.speed_min
    };
    let kind = if rng.random_bool(profile.bad_chance.clamp(0.0, 1.0)) {
        DropKind::Bad
    } else {
        DropKind::Good
    };

    let id = state.next_drop_id();
    state.drops.push(FallingDrop {
        id,
        rect: Rect::new(x, config.spawn_y, config.drop_size, config.drop_size),
        speed,
        kind,
    });
    log::trace!("Spawned {:?} drop {} at x={:.1}", kind, id, x);
}

/// Apply held keys to the player, clamped to the field
pub fn move_player(state: &mut CatchState, config: &CatchConfig) {
    let mut x = state.player.pos.x;
    if state.input.left {
        x -= config.player_speed;
    }
    if state.input.right {
        x += config.player_speed;
    }
    state.player.pos.x = x.clamp(0.0, config.player_max_x());
}

/// Simulation step: move the player, let drops fall, resolve catches.
///
/// Every drop is resolved at most once: it is removed the moment it
/// touches the player or leaves the field.
pub fn frame(state: &mut CatchState, config: &CatchConfig) -> FrameOutcome {
    move_player(state, config);

    let player = state.player;
    let despawn_y = config.field_height + config.despawn_margin;

    // Newest first, so removal doesn't disturb the unvisited part
    let mut i = state.drops.len();
    while i > 0 {
        i -= 1;
        let drop = &mut state.drops[i];
        drop.rect.pos.y += drop.speed;

        if drop.rect.intersects(&player) {
            let kind = drop.kind;
            state.drops.remove(i);
            match kind {
                DropKind::Bad => {
                    state.lives = state.lives.saturating_sub(1);
                    log::debug!("Bad catch, {} lives left", state.lives);
                    if state.lives == 0 {
                        return FrameOutcome::LivesExhausted;
                    }
                }
                DropKind::Good => state.score += 1,
            }
            continue;
        }

        if drop.rect.top() > despawn_y {
            state.drops.remove(i);
        }
    }

    FrameOutcome::Continue
}

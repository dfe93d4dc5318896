//! Falling-object catch game
//!
//! Three independent activities drive a running session: a one-second
//! countdown, the spawner, and the frame tick. All of them are scheduler
//! entries tagged with the session number, so anything that fires after the
//! session has ended or restarted is ignored.

pub mod state;
pub mod tick;

use rand::SeedableRng;
use rand_pcg::Pcg32;

pub use state::{
    CatchConfig, CatchInput, CatchPhase, CatchProfile, CatchState, DropKind, FallingDrop,
    COUNTDOWN_INTERVAL_MS, START_LIVES,
};
pub use tick::FrameOutcome;

use crate::scores::ScoreSink;
use crate::sim::difficulty::{Difficulty, LevelAdvance};
use crate::sim::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatchEvent {
    Countdown,
    Spawn,
    Frame,
    /// Delayed start after a level advance
    Restart,
}

#[derive(Debug, Clone, Copy)]
struct CatchTimer {
    session: u32,
    event: CatchEvent,
}

pub struct CatchEngine<R> {
    state: CatchState,
    config: CatchConfig,
    scheduler: Scheduler<CatchTimer>,
    rng: Pcg32,
    session: u32,
    recorder: R,
}

impl<R: ScoreSink> CatchEngine<R> {
    pub fn new(config: CatchConfig, seed: u64, recorder: R) -> Self {
        Self {
            state: CatchState::new(&config),
            config,
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            session: 0,
            recorder,
        }
    }

    pub fn state(&self) -> &CatchState {
        &self.state
    }

    pub fn config(&self) -> &CatchConfig {
        &self.config
    }

    pub fn phase(&self) -> CatchPhase {
        self.state.phase
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Virtual time since the engine was created
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Begin a session. Ignored while one is already running.
    pub fn start(&mut self, difficulty: Difficulty) -> bool {
        if self.state.phase == CatchPhase::Running {
            log::debug!("Catch game already running");
            return false;
        }

        self.scheduler.cancel_all();
        self.session += 1;
        self.state.reset(difficulty, &self.config);

        let session = self.session;
        let timer = |event| CatchTimer { session, event };
        self.scheduler
            .schedule_repeating(COUNTDOWN_INTERVAL_MS, timer(CatchEvent::Countdown));
        self.scheduler
            .schedule_repeating(self.state.profile.spawn_interval_ms, timer(CatchEvent::Spawn));
        self.scheduler
            .schedule_repeating(self.config.frame_interval_ms, timer(CatchEvent::Frame));

        self.state.phase = CatchPhase::Running;
        log::info!(
            "Catch game started on {} ({}s)",
            difficulty.as_str(),
            self.state.time_left
        );
        true
    }

    /// Finish the running session and credit its score
    pub fn end(&mut self, time_up: bool) {
        if self.state.phase != CatchPhase::Running {
            return;
        }

        self.scheduler.cancel_all();
        self.state.drops.clear();
        self.state.input = CatchInput::default();
        self.state.phase = CatchPhase::Ended { time_up };

        log::info!(
            "Catch game over ({}), score {}",
            if time_up { "time up" } else { "out of lives" },
            self.state.score
        );
        self.recorder.record(self.state.score);
    }

    /// Abandon everything and return to `Idle` without recording
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.session += 1;
        let difficulty = self.state.difficulty;
        self.state.reset(difficulty, &self.config);
        self.state.phase = CatchPhase::Idle;
    }

    /// Update held keys. Presses only register during a session.
    pub fn set_input(&mut self, input: CatchInput) {
        if self.state.phase == CatchPhase::Running {
            self.state.input = input;
        } else {
            self.state.input.left &= input.left;
            self.state.input.right &= input.right;
        }
    }

    /// Step to the next difficulty and start it after a short pause.
    /// Returns `None` while a session is running.
    pub fn advance_difficulty(&mut self) -> Option<LevelAdvance> {
        if self.state.phase == CatchPhase::Running {
            return None;
        }

        let advance = self.state.difficulty.next();
        match advance {
            LevelAdvance::Next(next) => {
                self.state.difficulty = next;
                self.scheduler.schedule_once(
                    self.config.next_level_delay_ms,
                    CatchTimer {
                        session: self.session,
                        event: CatchEvent::Restart,
                    },
                );
                log::info!("Next catch level: {}", next.as_str());
            }
            LevelAdvance::AllLevelsComplete => log::info!("All catch levels complete"),
        }
        Some(advance)
    }

    /// Result line for an ended session
    pub fn outcome_message(&self) -> Option<String> {
        match self.state.phase {
            CatchPhase::Ended { time_up: true } if self.state.lives > 0 => {
                Some("Time's up! Well done".to_string())
            }
            CatchPhase::Ended { .. } => {
                Some(format!("Game Over! Final Score: {}", self.state.score))
            }
            _ => None,
        }
    }

    /// Run the clock forward by `elapsed_ms`, firing everything that falls due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now_ms() + elapsed_ms;
        while let Some((_, timer)) = self.scheduler.pop_due(target) {
            self.dispatch(timer);
        }
        self.scheduler.set_now(target);
    }

    fn dispatch(&mut self, timer: CatchTimer) {
        if timer.session != self.session {
            log::trace!("Dropping stale {:?}", timer.event);
            return;
        }

        if timer.event == CatchEvent::Restart {
            let difficulty = self.state.difficulty;
            self.start(difficulty);
            return;
        }

        if self.state.phase != CatchPhase::Running {
            return;
        }

        match timer.event {
            CatchEvent::Countdown => {
                if tick::countdown(&mut self.state) {
                    self.end(true);
                }
            }
            CatchEvent::Spawn => tick::spawn_drop(&mut self.state, &self.config, &mut self.rng),
            CatchEvent::Frame => {
                if tick::frame(&mut self.state, &self.config) == FrameOutcome::LivesExhausted {
                    self.end(false);
                }
            }
            CatchEvent::Restart => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;

    fn engine() -> CatchEngine<Vec<u32>> {
        CatchEngine::new(CatchConfig::default(), 12345, Vec::new())
    }

    /// Field so tall that nothing spawned can reach the player in a session
    fn bottomless() -> CatchConfig {
        CatchConfig {
            field_height: 1.0e6,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_resets_for_every_difficulty() {
        for difficulty in Difficulty::ALL {
            let mut engine = engine();
            assert!(engine.start(difficulty));
            let state = engine.state();
            assert_eq!(state.phase, CatchPhase::Running);
            assert_eq!(state.lives, 3);
            assert_eq!(state.score, 0);
            assert_eq!(
                state.time_left,
                CatchProfile::for_difficulty(difficulty).duration_secs
            );
            assert!(state.drops.is_empty());
        }
    }

    #[test]
    fn test_easy_session_times_out() {
        let mut engine = CatchEngine::new(bottomless(), 1, Vec::new());
        engine.start(Difficulty::Easy);

        engine.advance(59_999);
        assert_eq!(engine.phase(), CatchPhase::Running);
        assert_eq!(engine.state().time_left, 1);
        assert!(!engine.state().drops.is_empty());

        engine.advance(1);
        assert_eq!(engine.phase(), CatchPhase::Ended { time_up: true });
        assert_eq!(engine.state().score, 0);
        assert!(engine.state().drops.is_empty());
        assert_eq!(engine.recorder(), &vec![0]);
        assert_eq!(engine.outcome_message().as_deref(), Some("Time's up! Well done"));
    }

    #[test]
    fn test_lives_end_session_early() {
        let mut engine = engine();
        engine.start(Difficulty::Medium);
        engine.state.score = 4;

        let player = engine.state.player;
        for i in 0..3 {
            let id = engine.state.next_drop_id();
            engine.state.drops.push(FallingDrop {
                id,
                rect: Rect::new(player.left(), player.top() - 20.0 - i as f32 * 200.0, 24.0, 24.0),
                speed: 4.0,
                kind: DropKind::Bad,
            });
        }

        engine.advance(5_000);
        assert_eq!(engine.phase(), CatchPhase::Ended { time_up: false });
        assert_eq!(engine.state().lives, 0);
        assert!(engine.state().time_left > 0);
        assert_eq!(engine.recorder(), &vec![4]);
        assert_eq!(
            engine.outcome_message().as_deref(),
            Some("Game Over! Final Score: 4")
        );
    }

    #[test]
    fn test_nothing_fires_after_end() {
        let mut engine = engine();
        engine.start(Difficulty::Hard);
        engine.advance(3_000);
        engine.end(true);
        let time_left = engine.state().time_left;

        engine.advance(120_000);
        assert_eq!(engine.state().time_left, time_left);
        assert!(engine.state().drops.is_empty());
        assert_eq!(engine.recorder().len(), 1);

        // Ending twice records once
        engine.end(false);
        assert_eq!(engine.recorder().len(), 1);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut engine = engine();
        engine.start(Difficulty::Easy);
        engine.advance(2_000);
        assert!(!engine.start(Difficulty::Hard));
        assert_eq!(engine.state().difficulty, Difficulty::Easy);
        assert_eq!(engine.state().time_left, 58);
    }

    #[test]
    fn test_restart_after_end() {
        let mut engine = engine();
        engine.start(Difficulty::Hard);
        engine.advance(35_000);
        assert!(matches!(engine.phase(), CatchPhase::Ended { .. }));

        assert!(engine.start(Difficulty::Easy));
        assert_eq!(engine.state().time_left, 60);
        assert_eq!(engine.state().lives, 3);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut engine = engine();
        let start_x = engine.state().player.left();

        // Ignored before the session
        engine.set_input(CatchInput { left: true, right: false });
        assert_eq!(engine.state().input, CatchInput::default());

        engine.start(Difficulty::Easy);
        engine.set_input(CatchInput { left: true, right: false });
        engine.advance(160);
        assert_eq!(engine.state().player.left(), start_x - 70.0);

        engine.set_input(CatchInput::default());
        engine.advance(160);
        assert_eq!(engine.state().player.left(), start_x - 70.0);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut engine = engine();
        engine.start(Difficulty::Easy);
        engine.advance(5_000);
        engine.reset();
        assert_eq!(engine.phase(), CatchPhase::Idle);
        engine.advance(100_000);
        assert_eq!(engine.phase(), CatchPhase::Idle);
        assert!(engine.recorder().is_empty());
    }

    #[test]
    fn test_advance_difficulty() {
        let mut engine = engine();
        engine.start(Difficulty::Easy);
        assert_eq!(engine.advance_difficulty(), None);
        engine.end(true);

        assert_eq!(
            engine.advance_difficulty(),
            Some(LevelAdvance::Next(Difficulty::Medium))
        );
        engine.advance(1_199);
        assert!(matches!(engine.phase(), CatchPhase::Ended { .. }));
        engine.advance(1);
        assert_eq!(engine.phase(), CatchPhase::Running);
        assert_eq!(engine.state().time_left, 45);

        engine.end(true);
        engine.advance_difficulty();
        engine.advance(1_200);
        engine.end(true);
        assert_eq!(engine.state().difficulty, Difficulty::Hard);
        assert_eq!(
            engine.advance_difficulty(),
            Some(LevelAdvance::AllLevelsComplete)
        );
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = engine();
        let mut b = engine();
        a.start(Difficulty::Hard);
        b.start(Difficulty::Hard);
        a.advance(10_000);
        b.advance(10_000);

        assert_eq!(a.state().score, b.state().score);
        assert_eq!(a.state().lives, b.state().lives);
        assert_eq!(a.state().drops.len(), b.state().drops.len());
    }
}

//! Memory card-matching game
//!
//! Cards go `Hidden -> Flipped -> {Hidden, Matched}`. Two flipped cards lock
//! the board until they are either matched or turned back over. Clearing a
//! board awards the level's points and, unless it was the last level, starts
//! the next one after a short pause.

pub mod deck;
pub mod state;

use rand::SeedableRng;
use rand_pcg::Pcg32;

pub use state::{
    Card, CardState, FlipOutcome, MemoryPhase, MemoryProfile, MemoryState, MemoryTiming,
    TIMER_INTERVAL_MS,
};

use crate::scores::ScoreSink;
use crate::sim::difficulty::{Difficulty, LevelAdvance};
use crate::sim::scheduler::{Scheduler, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryEvent {
    TimerTick,
    HideMismatch { first: usize, second: usize },
    NextLevel,
}

#[derive(Debug, Clone, Copy)]
struct MemoryTimer {
    session: u32,
    event: MemoryEvent,
}

pub struct MemoryEngine<R> {
    state: MemoryState,
    timing: MemoryTiming,
    scheduler: Scheduler<MemoryTimer>,
    rng: Pcg32,
    session: u32,
    timer: Option<TimerId>,
    recorder: R,
}

impl<R: ScoreSink> MemoryEngine<R> {
    pub fn new(timing: MemoryTiming, seed: u64, recorder: R) -> Self {
        Self {
            state: MemoryState::default(),
            timing,
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            session: 0,
            timer: None,
            recorder,
        }
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    pub fn phase(&self) -> MemoryPhase {
        self.state.phase
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Grid width for the current level
    pub fn columns(&self) -> usize {
        self.state.profile.columns
    }

    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Deal a fresh board. Ignored while a board is in play.
    pub fn start(&mut self, difficulty: Difficulty) -> bool {
        if self.state.phase == MemoryPhase::Running {
            log::debug!("Memory game already running");
            return false;
        }

        self.scheduler.cancel_all();
        self.session += 1;

        let profile = MemoryProfile::for_difficulty(difficulty);
        let symbols = &deck::symbols_for(difficulty)[..profile.pairs];
        let cards = deck::build_deck(symbols, &mut self.rng)
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card {
                id,
                symbol,
                state: CardState::Hidden,
            })
            .collect();

        self.state = MemoryState {
            phase: MemoryPhase::Running,
            difficulty,
            profile,
            cards,
            started_at_ms: self.scheduler.now_ms(),
            ..MemoryState::default()
        };
        self.timer = Some(self.scheduler.schedule_repeating(
            TIMER_INTERVAL_MS,
            MemoryTimer {
                session: self.session,
                event: MemoryEvent::TimerTick,
            },
        ));

        log::info!(
            "Memory game started on {} ({} pairs)",
            difficulty.as_str(),
            profile.pairs
        );
        true
    }

    /// Drop the current board and return to `Idle`
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.session += 1;
        self.timer = None;
        self.state = MemoryState {
            difficulty: self.state.difficulty,
            profile: self.state.profile,
            ..MemoryState::default()
        };
    }

    /// Turn a card face up
    pub fn flip(&mut self, card_id: usize) -> FlipOutcome {
        if self.state.phase != MemoryPhase::Running || self.state.locked {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.state.cards.get_mut(card_id) else {
            return FlipOutcome::Ignored;
        };
        if card.state != CardState::Hidden {
            return FlipOutcome::Ignored;
        }
        card.state = CardState::Flipped;

        let Some(first) = self.state.first else {
            self.state.first = Some(card_id);
            return FlipOutcome::Revealed;
        };

        self.state.second = Some(card_id);
        self.state.moves += 1;
        self.state.locked = true;

        if self.state.cards[first].symbol == self.state.cards[card_id].symbol {
            self.state.cards[first].state = CardState::Matched;
            self.state.cards[card_id].state = CardState::Matched;
            self.state.pairs_found += 1;
            self.state.reset_turn();
            log::debug!(
                "Pair found ({}/{})",
                self.state.pairs_found,
                self.state.total_pairs()
            );

            if self.state.pairs_found == self.state.total_pairs() {
                self.complete_level();
                return FlipOutcome::LevelComplete;
            }
            return FlipOutcome::Matched;
        }

        self.scheduler.schedule_once(
            self.timing.mismatch_delay_ms,
            MemoryTimer {
                session: self.session,
                event: MemoryEvent::HideMismatch {
                    first,
                    second: card_id,
                },
            },
        );
        FlipOutcome::Mismatched
    }

    fn complete_level(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.scheduler.cancel(timer);
        }
        self.refresh_elapsed();
        self.state.phase = MemoryPhase::LevelComplete;

        let points = self.state.profile.points;
        log::info!(
            "Memory level {} cleared in {} moves, {}s",
            self.state.difficulty.as_str(),
            self.state.moves,
            self.state.elapsed_secs
        );
        self.recorder.record(points);

        match self.state.difficulty.next() {
            LevelAdvance::AllLevelsComplete => {
                self.state.phase = MemoryPhase::AllLevelsComplete;
                log::info!("All memory levels complete");
            }
            LevelAdvance::Next(_) => {
                self.scheduler.schedule_once(
                    self.timing.level_advance_delay_ms,
                    MemoryTimer {
                        session: self.session,
                        event: MemoryEvent::NextLevel,
                    },
                );
            }
        }
    }

    /// Status line for the finished states
    pub fn message(&self) -> Option<&'static str> {
        match self.state.phase {
            MemoryPhase::LevelComplete => Some("Level completed! Starting next level..."),
            MemoryPhase::AllLevelsComplete => Some("Congratulations! You finished all levels!"),
            _ => None,
        }
    }

    fn refresh_elapsed(&mut self) {
        let elapsed_ms = self.scheduler.now_ms().saturating_sub(self.state.started_at_ms);
        self.state.elapsed_secs = elapsed_ms / 1000;
    }

    /// Run the clock forward by `elapsed_ms`, firing everything that falls due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now_ms() + elapsed_ms;
        while let Some((_, timer)) = self.scheduler.pop_due(target) {
            self.dispatch(timer);
        }
        self.scheduler.set_now(target);
    }

    fn dispatch(&mut self, timer: MemoryTimer) {
        if timer.session != self.session {
            log::trace!("Dropping stale {:?}", timer.event);
            return;
        }

        match timer.event {
            MemoryEvent::TimerTick => {
                if self.state.phase == MemoryPhase::Running {
                    self.refresh_elapsed();
                }
            }
            MemoryEvent::HideMismatch { first, second } => {
                if self.state.phase != MemoryPhase::Running {
                    return;
                }
                for id in [first, second] {
                    if let Some(card) = self.state.cards.get_mut(id) {
                        if card.state == CardState::Flipped {
                            card.state = CardState::Hidden;
                        }
                    }
                }
                self.state.reset_turn();
            }
            MemoryEvent::NextLevel => {
                if self.state.phase != MemoryPhase::LevelComplete {
                    return;
                }
                if let LevelAdvance::Next(next) = self.state.difficulty.next() {
                    self.start(next);
                }
            }
        }
    }
}

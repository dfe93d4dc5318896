//! Arcade Hub entry point
//!
//! Natively this runs a headless demo of the hub; on the web it wires up
//! logging and reports the stored session for the page scripts.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_hub {
    use arcade_hub::Arcade;
    use arcade_hub::platform::LocalStorage;

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Arcade Hub starting...");

        let Some(storage) = LocalStorage::open() else {
            log::error!("LocalStorage unavailable");
            return;
        };

        let arcade = Arcade::open(storage);
        match arcade.summary() {
            Some(summary) => log::info!(
                "Logged in as {} (score {}, games {})",
                summary.username,
                summary.score,
                summary.games_played
            ),
            None => log::info!("No user logged in"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_hub::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arcade Hub (native) starting...");
    log::info!("Native mode runs a scripted demo - build for wasm32 to play");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use arcade_hub::platform::{MemoryStorage, now_ms};
    use arcade_hub::sim::{
        CatchEngine, CatchInput, CatchPhase, Difficulty, DropKind, LevelAdvance, MemoryPhase,
    };
    use arcade_hub::{Arcade, AuthError, ScoreSink};

    const FRAME_MS: u64 = 16;

    pub fn run() {
        let arcade = Arcade::open(MemoryStorage::new());
        let auth = arcade.auth();
        let now = now_ms();

        if let Err(e) = auth.register("demo", "hunter2") {
            log::error!("Registration failed: {}", e);
            return;
        }
        for attempt in ["wrong", "hunter2"] {
            match auth.login("demo", attempt, now) {
                Ok(()) => println!("Logged in as demo"),
                Err(e @ AuthError::InvalidCredentials { .. }) => println!("{}", e),
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            }
        }

        let seed = now;
        let mut catch = arcade.catch_engine(seed);
        let mut difficulty = Difficulty::Easy;
        loop {
            catch.start(difficulty);
            play_catch(&mut catch);
            println!(
                "Catch {}: {}",
                difficulty.as_str(),
                catch.outcome_message().unwrap_or_default()
            );
            match catch.advance_difficulty() {
                Some(LevelAdvance::Next(next)) => difficulty = next,
                _ => break,
            }
        }

        let mut memory = arcade.memory_engine(seed);
        memory.start(Difficulty::Easy);
        while memory.phase() != MemoryPhase::AllLevelsComplete {
            let cards = memory.state().cards.clone();
            for a in &cards {
                if let Some(b) = cards.iter().find(|b| b.id > a.id && b.symbol == a.symbol) {
                    memory.flip(a.id);
                    memory.flip(b.id);
                }
            }
            println!(
                "Memory {}: {} moves",
                memory.state().difficulty.as_str(),
                memory.state().moves
            );
            memory.advance(arcade.settings().memory.level_advance_delay_ms);
        }
        if let Some(message) = memory.message() {
            println!("{}", message);
        }

        auth.logout();
        if let Some(user) = auth.users().find_user("demo") {
            println!(
                "demo: score {}, games played {}",
                user.score, user.games_played
            );
        }
    }

    /// Chase the nearest good drop, dodge bad ones
    fn play_catch<R: ScoreSink>(catch: &mut CatchEngine<R>) {
        while catch.phase() == CatchPhase::Running {
            let state = catch.state();
            let center = state.player.left() + state.player.size.x / 2.0;
            let target = state
                .drops
                .iter()
                .filter(|d| d.kind == DropKind::Good)
                .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()))
                .map(|d| d.rect.left() + d.rect.size.x / 2.0);

            let input = match target {
                Some(x) if x < center - 4.0 => CatchInput { left: true, right: false },
                Some(x) if x > center + 4.0 => CatchInput { left: false, right: true },
                _ => CatchInput::default(),
            };
            catch.set_input(input);
            catch.advance(FRAME_MS);
        }
    }
}

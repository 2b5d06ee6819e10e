//! The game controller: owns the session state and its collaborators.
//!
//! Input commands and ticks go through the pure functions in `compute`; the
//! events they leave behind are then handed to audio and persistence.

use rand::Rng;

use crate::audio::{AudioSink, Clip};
use crate::compute::{init_state, player_jump, restart, tick};
use crate::config::Tuning;
use crate::entities::{GameEvent, GameState, GameStatus};
use crate::highscore::HighScoreStore;

/// Discrete player inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Jump,
    Restart,
}

pub struct Game<S, A, R> {
    state: GameState,
    store: S,
    audio: A,
    rng: R,
}

impl<S: HighScoreStore, A: AudioSink, R: Rng> Game<S, A, R> {
    /// Load the persisted high score and start the first run with music on.
    pub fn new(tuning: Tuning, store: S, mut audio: A, rng: R) -> Self {
        let high_score = store.load();
        audio.start_music();
        Self {
            state: init_state(tuning, high_score),
            store,
            audio,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Jump only counts while running, restart only after game over.
    pub fn handle(&mut self, command: Command) {
        match (command, self.state.status) {
            (Command::Jump, GameStatus::Running) => {
                self.state = player_jump(&self.state);
            }
            (Command::Restart, GameStatus::GameOver) => {
                log::info!("restart (high score {})", self.state.high_score);
                self.state = restart(&self.state);
            }
            _ => {}
        }
        self.dispatch();
    }

    /// One simulation frame.
    pub fn update(&mut self) {
        self.state = tick(&self.state, &mut self.rng);
        self.dispatch();
    }

    fn dispatch(&mut self) {
        for event in std::mem::take(&mut self.state.events) {
            match event {
                GameEvent::Jumped { .. } => self.audio.play(Clip::Jump),
                GameEvent::GameOver { score, new_record } => {
                    self.audio.stop_music();
                    self.audio.play(Clip::GameOver);
                    if new_record {
                        if let Err(e) = self.store.save(score) {
                            log::warn!("{}", e);
                        }
                    }
                }
                GameEvent::Restarted => self.audio.start_music(),
                GameEvent::PowerUpCollected => log::debug!("power-up collected"),
                GameEvent::PowerUpExpired => log::debug!("power-up expired"),
                GameEvent::LandedOnEnemy => log::trace!("landed on enemy"),
                GameEvent::CoinCollected { bonus } => {
                    log::debug!("coin +{} (score {})", bonus, self.state.score)
                }
                GameEvent::EnemySpawned { .. }
                | GameEvent::JumpEnemySpawned { .. }
                | GameEvent::ItemSpawned { .. }
                | GameEvent::CoinWaveSpawned { .. } => log::trace!("{:?}", event),
            }
        }
    }
}

//! Game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.
//!
//! Frame order inside `tick`: player physics → background scroll → spawners →
//! world step → score → contacts.

use rand::Rng;

use crate::collision;
use crate::config::Tuning;
use crate::entities::{GameEvent, GameState, GameStatus, Player, Scrolling, SpawnTimers};
use crate::spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh session: grounded player, empty world, zeroed timers and score.
pub fn init_state(tuning: Tuning, high_score: u32) -> GameState {
    GameState {
        player: Player::new(&tuning),
        enemies: Vec::new(),
        jump_enemies: Vec::new(),
        items: Vec::new(),
        coins: Vec::new(),
        timers: SpawnTimers::default(),
        scroll: 0.0,
        distance: 0.0,
        coin_bonus: 0,
        score: 0,
        high_score,
        new_record: false,
        status: GameStatus::Running,
        frame: 0,
        events: Vec::new(),
        tuning,
    }
}

/// Start over, keeping only the tuning and the best score.
pub fn restart(state: &GameState) -> GameState {
    let mut fresh = init_state(state.tuning.clone(), state.high_score);
    fresh.events.push(GameEvent::Restarted);
    fresh
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// Jump key pressed.  Ignored after game over or when no jumps are left.
pub fn player_jump(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.is_running() && next.player.try_jump() {
        next.events.push(GameEvent::Jumped {
            double: next.player.jump_count > 1,
        });
    }
    next
}

// ── World step ───────────────────────────────────────────────────────────────

fn advance<T: Scrolling>(entities: &mut Vec<T>, speed: f32) {
    for entity in entities.iter_mut() {
        entity.scroll(speed);
    }
    entities.retain(|e| !e.is_off_screen());
}

/// Background offset moves at base speed (never boosted) and wraps after one
/// viewport width, so two floor segments tile seamlessly.
pub fn scroll_background(state: &mut GameState) {
    state.scroll -= state.tuning.base_speed;
    if state.scroll <= -state.tuning.viewport_width {
        state.scroll = 0.0;
    }
}

/// Move every scrolling entity at the current world speed and drop the ones
/// that left the screen.
pub fn world_step(state: &mut GameState) {
    let speed = state.world_speed();
    advance(&mut state.enemies, speed);
    advance(&mut state.jump_enemies, speed);
    advance(&mut state.items, speed);
    advance(&mut state.coins, speed);
}

/// Add this frame's distance and recompute the displayed score.
pub fn update_score(state: &mut GameState) {
    state.distance += state.tuning.distance_per_frame();
    state.score = state.distance.floor() as u32 + state.coin_bonus;
}

/// Switch to `GameOver` and settle the high score.  Only the first call in a
/// run has any effect.
pub fn game_over(state: &mut GameState) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.status = GameStatus::GameOver;
    if state.score > state.high_score {
        state.high_score = state.score;
        state.new_record = true;
    }
    log::info!(
        "game over at frame {} with score {} (new record: {})",
        state.frame,
        state.score,
        state.new_record
    );
    state.events.push(GameEvent::GameOver {
        score: state.score,
        new_record: state.new_record,
    });
}

// ── Per-frame tick (RNG is injected) ─────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing once the game is over
/// beyond clearing the previous frame's events.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.events.clear();
    if !next.is_running() {
        return next;
    }
    next.frame += 1;

    if next.player.update() {
        next.events.push(GameEvent::PowerUpExpired);
    }
    scroll_background(&mut next);

    spawner::run(&mut next, rng);
    world_step(&mut next);
    update_score(&mut next);

    if collision::resolve(&mut next) {
        game_over(&mut next);
    }
    next
}

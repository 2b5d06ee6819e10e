//! Timed spawning of enemies, items and coin waves.
//!
//! Each kind has its own frame counter in `GameState::timers`.  A kind spawns
//! once its counter *exceeds* its threshold, then the counter restarts at 0.
//! New entities appear at the right edge of the viewport plus random jitter.
//! All randomness comes through the injected `rng`.

use rand::Rng;

use crate::entities::{Coin, Enemy, EnemyJump, EnemyKind, GameEvent, GameState, Item, Rect};

/// Relative placement of the three coins in a wave.
const COIN_WAVE: [(f32, f32); 3] = [(0.0, 0.0), (40.0, -20.0), (80.0, 20.0)];

/// Uniform integer in `lo..=hi`, tolerant of a reversed range.
fn pick(rng: &mut impl Rng, lo: u32, hi: u32) -> u32 {
    rng.gen_range(lo.min(hi)..=hi.max(lo))
}

fn spawn_x(state: &GameState, rng: &mut impl Rng, jitter: u32) -> f32 {
    state.tuning.viewport_width + pick(rng, 0, jitter) as f32
}

/// Count one frame and run every spawner, reading the score from the
/// previous frame.
pub fn run(state: &mut GameState, rng: &mut impl Rng) {
    state.timers.enemy += 1;
    state.timers.item += 1;
    state.timers.jump_enemy += 1;
    state.timers.coin += 1;

    spawn_enemy(state, rng);
    spawn_item(state, rng);
    spawn_jump_enemy(state, rng);
    spawn_coins(state, rng);
}

/// Ground enemy.  The interval shrinks as the score rises; past
/// `big_enemy_score` some spawns are big.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    if state.timers.enemy <= state.tuning.enemy_interval(state.score) {
        return;
    }
    let x = spawn_x(state, rng, state.tuning.enemy_jitter);
    let kind = if state.score >= state.tuning.big_enemy_score
        && rng.gen_bool(state.tuning.big_enemy_chance.clamp(0.0, 1.0))
    {
        EnemyKind::Big
    } else {
        EnemyKind::Normal
    };
    log::debug!("spawn {:?} enemy at x={}", kind, x);
    state.enemies.push(Enemy::new(kind, x, &state.tuning));
    state.events.push(GameEvent::EnemySpawned { kind, x });
    state.timers.enemy = 0;
}

/// Jump enemy, only once the score reaches `jump_enemy_score`.  The counter
/// keeps running below that score, so the first one appears right away.
pub fn spawn_jump_enemy(state: &mut GameState, rng: &mut impl Rng) {
    if state.score < state.tuning.jump_enemy_score
        || state.timers.jump_enemy <= state.tuning.jump_enemy_interval
    {
        return;
    }
    let x = spawn_x(state, rng, state.tuning.jump_enemy_jitter);
    log::debug!("spawn jump enemy at x={}", x);
    state.jump_enemies.push(EnemyJump::new(x, &state.tuning));
    state.events.push(GameEvent::JumpEnemySpawned { x });
    state.timers.jump_enemy = 0;
}

/// Power-up pickup floating somewhere above the floor.
pub fn spawn_item(state: &mut GameState, rng: &mut impl Rng) {
    if state.timers.item <= state.tuning.item_interval {
        return;
    }
    let t = &state.tuning;
    let x = spawn_x(state, rng, t.item_jitter);
    let y = t.floor_y() - pick(rng, t.item_min_height, t.item_max_height) as f32;
    state.items.push(Item {
        rect: Rect::new(x, y, t.item_size, t.item_size),
        speed: t.base_speed + 1.0,
    });
    state.events.push(GameEvent::ItemSpawned { x, y });
    state.timers.item = 0;
}

/// A wave of three coins at fixed offsets from one random base point.
pub fn spawn_coins(state: &mut GameState, rng: &mut impl Rng) {
    if state.timers.coin <= state.tuning.coin_interval {
        return;
    }
    let t = &state.tuning;
    let floor = t.floor_y().max(0.0) as u32;
    let base_y = pick(
        rng,
        floor.saturating_sub(t.coin_max_height),
        floor.saturating_sub(t.coin_min_height),
    ) as f32;
    let base_x = spawn_x(state, rng, t.coin_jitter);

    for (dx, dy) in COIN_WAVE {
        let frame = rng.gen_range(0..=60);
        state.coins.push(Coin {
            x: base_x + dx,
            y: base_y + dy,
            radius: t.coin_radius,
            frame,
            speed: t.base_speed,
        });
    }
    state.events.push(GameEvent::CoinWaveSpawned {
        x: base_x,
        y: base_y,
    });
    state.timers.coin = 0;
}

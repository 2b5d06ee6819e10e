//! Player-versus-world contact resolution, run once per tick after
//! everything has moved.
//!
//! Entities are tested in list order against the *current* player rectangle.
//! Landing on an enemy moves the player, so when two enemies overlap in the
//! same frame the first one in the list decides the outcome of the second.

use crate::entities::{GameEvent, GameState};

/// What touching the ground enemies did to the player this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnemyContact {
    /// Landed on top of at least one enemy.
    pub landed: bool,
    /// Hit an enemy from the side or below.
    pub fatal: bool,
}

/// Ground enemies: a shallow contact while falling is a landing, anything
/// else is fatal.
pub fn resolve_enemies(state: &mut GameState) -> EnemyContact {
    let mut contact = EnemyContact::default();
    let tolerance = state.tuning.landing_tolerance;
    let player = &mut state.player;

    for enemy in &state.enemies {
        if !player.rect.overlaps(&enemy.rect) {
            continue;
        }
        let depth = player.rect.bottom() - enemy.rect.top();
        if player.vel_y > 0.0 && depth < tolerance {
            player.land_on(enemy.rect.top());
            contact.landed = true;
        } else {
            contact.fatal = true;
        }
    }
    if contact.landed {
        state.events.push(GameEvent::LandedOnEnemy);
    }
    contact
}

/// Jump enemies cannot be stood on.  Returns `true` on any overlap.
pub fn resolve_jump_enemies(state: &GameState) -> bool {
    state
        .jump_enemies
        .iter()
        .any(|j| state.player.rect.overlaps(&j.rect()))
}

/// Items grant the power-up and disappear.
pub fn collect_items(state: &mut GameState) {
    let frames = state.tuning.power_up_frames;
    let before = state.items.len();
    let player_rect = state.player.rect;
    state.items.retain(|item| !player_rect.overlaps(&item.rect));

    for _ in state.items.len()..before {
        state.player.activate_power_up(frames);
        state.events.push(GameEvent::PowerUpCollected);
    }
}

/// Each touched coin adds the bonus once and disappears.
pub fn collect_coins(state: &mut GameState) {
    let bonus = state.tuning.coin_bonus;
    let before = state.coins.len();
    let player_rect = state.player.rect;
    state.coins.retain(|coin| !player_rect.overlaps(&coin.rect()));

    for _ in state.coins.len()..before {
        state.coin_bonus += bonus;
        state.events.push(GameEvent::CoinCollected { bonus });
    }
}

/// Full contact pass.  Returns `true` if the player died this frame.
pub fn resolve(state: &mut GameState) -> bool {
    let contact = resolve_enemies(state);
    let hit_jumper = resolve_jump_enemies(state);

    if !contact.landed && state.player.rect.bottom() < state.player.floor_y {
        state.player.on_ground = false;
    }

    collect_items(state);
    collect_coins(state);

    contact.fatal || hit_jumper
}

use jump_runner::collision::{self, EnemyContact};
use jump_runner::compute::init_state;
use jump_runner::config::Tuning;
use jump_runner::entities::*;

/// Enemy at x=100 (top edge 320), directly under the player's start column.
fn state_with_enemy() -> GameState {
    let mut s = init_state(Tuning::default(), 0);
    let enemy = Enemy::new(EnemyKind::Normal, 100.0, &s.tuning);
    s.enemies.push(enemy);
    s
}

/// Put the player's bottom edge at `bottom`, moving at `vel_y`.
fn place_player(s: &mut GameState, bottom: f32, vel_y: f32) {
    s.player.rect.set_bottom(bottom);
    s.player.vel_y = vel_y;
    s.player.on_ground = false;
    s.player.jump_count = 1;
}

fn coin_at(x: f32, y: f32) -> Coin {
    Coin {
        x,
        y,
        radius: 10.0,
        frame: 0,
        speed: 4.0,
    }
}

// ── Ground enemies ────────────────────────────────────────────────────────────

#[test]
fn shallow_contact_while_falling_is_a_landing() {
    let mut s = state_with_enemy();
    place_player(&mut s, 330.0, 5.0);

    let contact = collision::resolve_enemies(&mut s);
    assert_eq!(
        contact,
        EnemyContact {
            landed: true,
            fatal: false
        }
    );
    assert_eq!(s.player.rect.bottom(), 320.0);
    assert_eq!(s.player.vel_y, 0.0);
    assert_eq!(s.player.jump_count, 0);
    assert_eq!(s.events, vec![GameEvent::LandedOnEnemy]);
}

#[test]
fn contact_just_under_tolerance_still_lands() {
    let mut s = state_with_enemy();
    place_player(&mut s, 339.5, 1.0);
    assert!(collision::resolve_enemies(&mut s).landed);
}

#[test]
fn deep_contact_while_falling_is_fatal() {
    let mut s = state_with_enemy();
    place_player(&mut s, 340.0, 5.0);
    let contact = collision::resolve_enemies(&mut s);
    assert!(contact.fatal);
    assert!(!contact.landed);
}

#[test]
fn rising_contact_is_fatal() {
    let mut s = state_with_enemy();
    place_player(&mut s, 330.0, -5.0);
    assert!(collision::resolve_enemies(&mut s).fatal);
}

#[test]
fn resting_contact_is_fatal() {
    let mut s = state_with_enemy();
    place_player(&mut s, 330.0, 0.0);
    assert!(collision::resolve_enemies(&mut s).fatal);
}

#[test]
fn side_contact_on_the_floor_is_fatal() {
    let mut s = init_state(Tuning::default(), 0);
    s.enemies
        .push(Enemy::new(EnemyKind::Normal, 130.0, &s.tuning));
    assert!(collision::resolve_enemies(&mut s).fatal);
}

#[test]
fn no_overlap_no_contact() {
    let mut s = state_with_enemy();
    place_player(&mut s, 320.0, 5.0);
    assert_eq!(collision::resolve_enemies(&mut s), EnemyContact::default());
    assert!(s.events.is_empty());
}

/// Two enemies overlap the player in the same frame.  The first in list order
/// is resolved first and moves the player, which decides the second.
#[test]
fn overlapping_enemies_resolve_in_list_order() {
    let build = |high_first: bool| {
        let mut s = init_state(Tuning::default(), 0);
        let low = Enemy::new(EnemyKind::Normal, 100.0, &s.tuning);
        let mut high = Enemy::new(EnemyKind::Normal, 110.0, &s.tuning);
        high.rect.y = 315.0;
        if high_first {
            s.enemies.push(high);
            s.enemies.push(low);
        } else {
            s.enemies.push(low);
            s.enemies.push(high);
        }
        place_player(&mut s, 330.0, 5.0);
        s
    };

    let mut low_first = build(false);
    let contact = collision::resolve_enemies(&mut low_first);
    assert!(contact.landed);
    assert!(contact.fatal);

    let mut high_first = build(true);
    let contact = collision::resolve_enemies(&mut high_first);
    assert!(contact.landed);
    assert!(!contact.fatal);
    assert_eq!(high_first.player.rect.bottom(), 315.0);
}

// ── Jump enemies ──────────────────────────────────────────────────────────────

#[test]
fn jump_enemy_contact_is_always_fatal() {
    let mut s = init_state(Tuning::default(), 0);
    s.jump_enemies.push(EnemyJump::new(100.0, &s.tuning));

    // Falling onto its top edge would be a landing on a ground enemy.
    place_player(&mut s, 325.0, 5.0);
    assert!(collision::resolve_jump_enemies(&s));

    place_player(&mut s, 330.0, -5.0);
    assert!(collision::resolve_jump_enemies(&s));

    place_player(&mut s, 320.0, 5.0);
    assert!(!collision::resolve_jump_enemies(&s));
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn item_grants_power_up_and_disappears() {
    let mut s = init_state(Tuning::default(), 0);
    s.items.push(Item {
        rect: Rect::new(110.0, 310.0, 30.0, 30.0),
        speed: 4.0,
    });
    s.items.push(Item {
        rect: Rect::new(600.0, 250.0, 30.0, 30.0),
        speed: 4.0,
    });

    collision::collect_items(&mut s);
    assert_eq!(s.items.len(), 1);
    assert_eq!(s.items[0].rect.x, 600.0);
    assert!(s.player.power_up_active);
    assert_eq!(s.player.max_jumps, 2);
    assert_eq!(s.player.power_up_frames, 600);
    assert_eq!(s.events, vec![GameEvent::PowerUpCollected]);
}

#[test]
fn coin_adds_fifty_and_removes_exactly_one() {
    let mut s = init_state(Tuning::default(), 0);
    s.coins.push(coin_at(120.0, 330.0));
    s.coins.push(coin_at(500.0, 200.0));

    collision::collect_coins(&mut s);
    assert_eq!(s.coin_bonus, 50);
    assert_eq!(s.coins.len(), 1);
    assert_eq!(s.coins[0].x, 500.0);
    assert_eq!(s.events, vec![GameEvent::CoinCollected { bonus: 50 }]);
}

#[test]
fn each_touched_coin_counts_once() {
    let mut s = init_state(Tuning::default(), 0);
    s.coins.push(coin_at(110.0, 310.0));
    s.coins.push(coin_at(130.0, 340.0));

    collision::collect_coins(&mut s);
    assert_eq!(s.coin_bonus, 100);
    assert!(s.coins.is_empty());

    collision::collect_coins(&mut s);
    assert_eq!(s.coin_bonus, 100);
}

#[test]
fn coin_just_out_of_reach_is_kept() {
    let mut s = init_state(Tuning::default(), 0);
    // bounding square 140..160 touches the player's right edge at 140
    s.coins.push(coin_at(150.0, 330.0));
    collision::collect_coins(&mut s);
    assert_eq!(s.coin_bonus, 0);
    assert_eq!(s.coins.len(), 1);
}

// ── Full pass ─────────────────────────────────────────────────────────────────

#[test]
fn airborne_player_not_on_enemy_loses_ground_flag() {
    let mut s = init_state(Tuning::default(), 0);
    s.player.rect.set_bottom(200.0);
    s.player.on_ground = true;

    assert!(!collision::resolve(&mut s));
    assert!(!s.player.on_ground);
}

#[test]
fn grounded_player_keeps_ground_flag() {
    let mut s = init_state(Tuning::default(), 0);
    assert!(!collision::resolve(&mut s));
    assert!(s.player.on_ground);
}

#[test]
fn resolve_reports_any_fatal_contact() {
    let mut s = state_with_enemy();
    place_player(&mut s, 330.0, 5.0);
    assert!(!collision::resolve(&mut s));

    let mut s = init_state(Tuning::default(), 0);
    s.jump_enemies.push(EnemyJump::new(120.0, &s.tuning));
    assert!(collision::resolve(&mut s));
}

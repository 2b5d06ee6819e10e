//! All game entity types plus their per-frame kinematics.
//!
//! World coordinates are pixels of a fixed viewport (`Tuning::viewport_*`),
//! origin top-left, y growing downward.  Nothing in here touches the
//! terminal, the RNG or the file system.

use crate::config::Tuning;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Status & events ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Something that happened during one tick.  Collected in `GameState::events`
/// and consumed by the controller (audio, persistence, logging).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Jumped { double: bool },
    EnemySpawned { kind: EnemyKind, x: f32 },
    JumpEnemySpawned { x: f32 },
    ItemSpawned { x: f32, y: f32 },
    CoinWaveSpawned { x: f32, y: f32 },
    LandedOnEnemy,
    CoinCollected { bonus: u32 },
    PowerUpCollected,
    PowerUpExpired,
    GameOver { score: u32, new_record: bool },
    Restarted,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub vel_y: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub double_jump_power: f32,
    pub jump_count: u32,
    /// 1 normally, 2 while a power-up is active.
    pub max_jumps: u32,
    pub on_ground: bool,
    pub power_up_active: bool,
    /// Frames of power-up left.
    pub power_up_frames: u32,
    pub floor_y: f32,
}

impl Player {
    /// A grounded player at the start position.
    pub fn new(tuning: &Tuning) -> Self {
        let floor_y = tuning.floor_y();
        Self {
            rect: Rect::new(
                tuning.player_start_x,
                floor_y - tuning.player_height,
                tuning.player_width,
                tuning.player_height,
            ),
            vel_y: 0.0,
            gravity: tuning.gravity,
            jump_power: tuning.jump_power,
            double_jump_power: tuning.double_jump_power,
            jump_count: 0,
            max_jumps: 1,
            on_ground: true,
            power_up_active: false,
            power_up_frames: 0,
            floor_y,
        }
    }

    /// Start a jump if any are left.  The first jump uses `jump_power`, the
    /// power-up's second jump the weaker `double_jump_power`.
    /// Returns `false` (and changes nothing) when out of jumps.
    pub fn try_jump(&mut self) -> bool {
        if self.jump_count >= self.max_jumps {
            return false;
        }
        self.vel_y = if self.jump_count == 0 {
            self.jump_power
        } else {
            self.double_jump_power
        };
        self.jump_count += 1;
        self.on_ground = false;
        true
    }

    pub fn activate_power_up(&mut self, frames: u32) {
        self.power_up_active = true;
        self.max_jumps = 2;
        self.power_up_frames = frames;
    }

    /// One frame of vertical motion, floor landing and power-up countdown.
    ///
    /// Position moves with the velocity from *before* gravity is applied.
    /// Returns `true` on the frame the power-up runs out.
    pub fn update(&mut self) -> bool {
        self.rect.y += self.vel_y;
        self.vel_y += self.gravity;

        if self.rect.bottom() >= self.floor_y {
            self.rect.set_bottom(self.floor_y);
            self.vel_y = 0.0;
            self.jump_count = 0;
            self.on_ground = true;
        }

        if !self.power_up_active {
            return false;
        }
        self.power_up_frames = self.power_up_frames.saturating_sub(1);
        if self.power_up_frames > 0 {
            return false;
        }
        self.power_up_active = false;
        self.max_jumps = 1;
        // a double jump in progress must not leave jump_count above the new cap
        self.jump_count = self.jump_count.min(self.max_jumps);
        true
    }

    /// Put the player on top of `surface_top` (an enemy used as a platform).
    pub fn land_on(&mut self, surface_top: f32) {
        self.rect.set_bottom(surface_top);
        self.vel_y = 0.0;
        self.jump_count = 0;
    }
}

// ── Scrolling entities ────────────────────────────────────────────────────────

/// Shared behaviour of everything that moves right-to-left with the world.
pub trait Scrolling {
    /// Advance one frame at the world speed broadcast by the controller.
    fn scroll(&mut self, speed: f32);
    /// `true` once the trailing edge has passed the left edge of the viewport.
    fn is_off_screen(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    /// Larger footprint, only spawned past `Tuning::big_enemy_score`.
    Big,
}

impl EnemyKind {
    pub fn size(&self, tuning: &Tuning) -> f32 {
        match self {
            EnemyKind::Normal => tuning.enemy_size,
            EnemyKind::Big => tuning.big_enemy_size,
        }
    }
}

/// Ground enemy.  Can be stood on; touching it any other way is fatal.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    /// Last speed it moved at; overwritten every frame.
    pub speed: f32,
}

impl Enemy {
    /// An enemy of `kind` standing on the floor at `x`.
    pub fn new(kind: EnemyKind, x: f32, tuning: &Tuning) -> Self {
        let size = kind.size(tuning);
        Self {
            rect: Rect::new(x, tuning.floor_y() - size, size, size),
            kind,
            speed: tuning.base_speed,
        }
    }
}

impl Scrolling for Enemy {
    fn scroll(&mut self, speed: f32) {
        self.speed = speed;
        self.rect.x -= speed;
    }

    fn is_off_screen(&self) -> bool {
        self.rect.right() <= 0.0
    }
}

/// Enemy that hops by itself once it gets close to the player's side of the
/// screen.  Always fatal on contact.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyJump {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub vel_y: f32,
    pub gravity: f32,
    pub impulse: f32,
    pub on_ground: bool,
    /// Inside the trigger band; drawn highlighted.
    pub glow: bool,
    pub floor_y: f32,
    pub band: (f32, f32),
}

impl EnemyJump {
    pub fn new(x: f32, tuning: &Tuning) -> Self {
        let floor_y = tuning.floor_y();
        Self {
            x,
            y: floor_y - tuning.jump_enemy_size,
            size: tuning.jump_enemy_size,
            vel_y: 0.0,
            gravity: tuning.gravity,
            impulse: tuning.jump_enemy_impulse,
            on_ground: true,
            glow: false,
            floor_y,
            band: (tuning.glow_band_start, tuning.glow_band_end),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    fn in_band(&self) -> bool {
        self.band.0 < self.x && self.x < self.band.1
    }
}

impl Scrolling for EnemyJump {
    /// Airborne motion integrates like `Player::update`: position with the
    /// current velocity first, then gravity.
    fn scroll(&mut self, speed: f32) {
        self.x -= speed;

        self.glow = self.in_band();
        if self.glow && self.on_ground {
            self.vel_y = self.impulse;
            self.on_ground = false;
        }

        if !self.on_ground {
            self.y += self.vel_y;
            self.vel_y += self.gravity;
            if self.y + self.size >= self.floor_y {
                self.y = self.floor_y - self.size;
                self.vel_y = 0.0;
                self.on_ground = true;
            }
        }
    }

    fn is_off_screen(&self) -> bool {
        self.x + self.size <= 0.0
    }
}

/// Spinning coin.  Centre + radius; collides as its bounding square.
#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Animation counter; drives the squash effect.
    pub frame: u32,
    pub speed: f32,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// Drawn width for the current animation frame: a full turn every 60 frames.
    pub fn squash_width(&self) -> f32 {
        let angle = (self.frame % 60) as f32 / 60.0 * std::f32::consts::TAU;
        (self.radius * 2.0 * angle.sin().abs()).floor().max(2.0)
    }
}

impl Scrolling for Coin {
    fn scroll(&mut self, speed: f32) {
        self.speed = speed;
        self.x -= speed;
        self.frame += 1;
    }

    fn is_off_screen(&self) -> bool {
        self.x <= -self.radius * 2.0
    }
}

/// Power-up pickup.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub rect: Rect,
    pub speed: f32,
}

impl Scrolling for Item {
    fn scroll(&mut self, speed: f32) {
        self.speed = speed;
        self.rect.x -= speed;
    }

    fn is_off_screen(&self) -> bool {
        self.rect.right() <= 0.0
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Per-kind spawn counters, in frames since the last spawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnTimers {
    pub enemy: u32,
    pub jump_enemy: u32,
    pub item: u32,
    pub coin: u32,
}

/// Everything one play session owns.  Reset builds a fresh one.
#[derive(Clone, Debug)]
pub struct GameState {
    pub tuning: Tuning,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub jump_enemies: Vec<EnemyJump>,
    pub items: Vec<Item>,
    pub coins: Vec<Coin>,
    pub timers: SpawnTimers,
    /// Background offset in `(-viewport_width, 0]`.
    pub scroll: f32,
    pub distance: f64,
    pub coin_bonus: u32,
    /// `floor(distance) + coin_bonus`.
    pub score: u32,
    /// Best score known to this session (persisted value or better).
    pub high_score: u32,
    /// Set when this run beat the previous high score.
    pub new_record: bool,
    pub status: GameStatus,
    /// Ticks run since the session started.
    pub frame: u64,
    /// Events produced by the most recent tick.
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Speed every scrolling entity moves at this frame.
    pub fn world_speed(&self) -> f32 {
        self.tuning.world_speed(self.score)
    }
}

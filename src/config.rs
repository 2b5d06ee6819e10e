//! Gameplay tuning and runtime configuration.
//!
//! Every number the simulation depends on lives in `Tuning`, so tests can
//! build a state with tweaked values and the binary can read overrides from
//! a JSON file.  Both structs are `#[serde(default)]`: a config file only
//! needs to name the fields it changes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "JUMP_RUNNER_CONFIG";

// ── Tuning ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Viewport & world
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Distance from the bottom of the viewport to the floor line.
    pub floor_margin: f32,
    /// World speed before the late-game boost.  Also the background scroll speed.
    pub base_speed: f32,
    pub speed_boost_score: u32,
    pub speed_boost_factor: f32,
    pub fps: u32,

    // Player
    pub player_start_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub double_jump_power: f32,
    pub power_up_frames: u32,
    /// Max overlap depth (px) at an enemy's top edge that still counts as landing on it.
    pub landing_tolerance: f32,

    // Ground enemies
    pub enemy_size: f32,
    pub big_enemy_size: f32,
    pub big_enemy_score: u32,
    pub big_enemy_chance: f64,
    pub enemy_interval_max: u32,
    pub enemy_interval_min: u32,
    pub enemy_jitter: u32,

    // Jump enemies
    pub jump_enemy_score: u32,
    pub jump_enemy_interval: u32,
    pub jump_enemy_jitter: u32,
    pub jump_enemy_size: f32,
    pub jump_enemy_impulse: f32,
    pub glow_band_start: f32,
    pub glow_band_end: f32,

    // Items
    pub item_interval: u32,
    pub item_jitter: u32,
    pub item_size: f32,
    pub item_min_height: u32,
    pub item_max_height: u32,

    // Coins
    pub coin_interval: u32,
    pub coin_jitter: u32,
    pub coin_radius: f32,
    pub coin_min_height: u32,
    pub coin_max_height: u32,
    pub coin_bonus: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 400.0,
            floor_margin: 40.0,
            base_speed: 4.0,
            speed_boost_score: 1500,
            speed_boost_factor: 1.5,
            fps: 60,

            player_start_x: 100.0,
            player_width: 40.0,
            player_height: 60.0,
            gravity: 0.8,
            jump_power: -15.0,
            double_jump_power: -12.0,
            power_up_frames: 600,
            landing_tolerance: 20.0,

            enemy_size: 40.0,
            big_enemy_size: 60.0,
            big_enemy_score: 1000,
            big_enemy_chance: 0.3,
            enemy_interval_max: 90,
            enemy_interval_min: 45,
            enemy_jitter: 300,

            jump_enemy_score: 500,
            jump_enemy_interval: 500,
            jump_enemy_jitter: 200,
            jump_enemy_size: 40.0,
            jump_enemy_impulse: -23.0,
            glow_band_start: 0.0,
            glow_band_end: 250.0,

            item_interval: 600,
            item_jitter: 300,
            item_size: 30.0,
            item_min_height: 80,
            item_max_height: 150,

            coin_interval: 300,
            coin_jitter: 200,
            coin_radius: 10.0,
            coin_min_height: 60,
            coin_max_height: 150,
            coin_bonus: 50,
        }
    }
}

impl Tuning {
    /// y-coordinate of the floor line.
    pub fn floor_y(&self) -> f32 {
        self.viewport_height - self.floor_margin
    }

    /// Frames a ground enemy waits between spawns at the given score.
    pub fn enemy_interval(&self, score: u32) -> u32 {
        self.enemy_interval_max
            .saturating_sub(score / 100)
            .max(self.enemy_interval_min)
    }

    /// World speed for entities at the given score.
    pub fn world_speed(&self, score: u32) -> f32 {
        if score >= self.speed_boost_score {
            self.base_speed * self.speed_boost_factor
        } else {
            self.base_speed
        }
    }

    /// Distance travelled per running frame.
    pub fn distance_per_frame(&self) -> f64 {
        f64::from(self.base_speed) / 10.0
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Where the running configuration came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// `JUMP_RUNNER_CONFIG` unset.
    #[default]
    Defaults,
    /// Named file did not exist; defaults used.
    Missing(PathBuf),
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "built-in defaults ({} unset)", CONFIG_ENV),
            ConfigSource::Missing(path) => {
                write!(f, "built-in defaults ({} not found)", path.display())
            }
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tuning: Tuning,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
    /// Optional text-art file used to draw the player.
    pub player_sprite: Option<PathBuf>,
    pub audio: bool,
    /// Fixed RNG seed for a reproducible run.
    pub seed: Option<u64>,
    #[serde(skip)]
    pub source: ConfigSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            high_score_path: PathBuf::from("highscore.txt"),
            log_path: std::env::temp_dir().join("jump_runner.log"),
            player_sprite: None,
            audio: true,
            seed: None,
            source: ConfigSource::Defaults,
        }
    }
}

impl Config {
    /// Load from the file named by `JUMP_RUNNER_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, GameError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Load a JSON config.  A missing file yields the defaults; a malformed
    /// one is an error.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("config {} not found, using defaults", path.display());
                return Ok(Self {
                    source: ConfigSource::Missing(path.to_path_buf()),
                    ..Self::default()
                });
            }
            Err(e) => return Err(e.into()),
        };
        let mut config: Self = serde_json::from_str(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = ConfigSource::File(path.to_path_buf());
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

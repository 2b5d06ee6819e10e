//! Rendering layer: all terminal drawing lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; world pixels are only mapped to
//! terminal cells and turned into crossterm commands.

use std::io::Write;
use std::path::Path;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use jump_runner::entities::{Coin, Enemy, EnemyJump, EnemyKind, GameState, Item, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FLOOR: Color = Color::Green;
const C_HUD: Color = Color::White;
const C_POWER: Color = Color::Cyan;
const C_PLAYER: Color = Color::Blue;
const C_PLAYER_POWERED: Color = Color::Cyan;
const C_ENEMY: Color = Color::Red;
const C_ENEMY_BIG: Color = Color::DarkRed;
const C_JUMPER_GLOW: Color = Color::Yellow;
const C_ITEM: Color = Color::Cyan;
const C_COIN: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Spacing (world px) of the marks drawn on the floor so scrolling is visible.
const FLOOR_MARK_SPACING: f32 = 80.0;

// ── Player skin ───────────────────────────────────────────────────────────────

/// How the player is drawn, decided once at startup.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerSkin {
    /// Text art, one string per row, drawn from the player's top-left cell.
    Sprite(Vec<String>),
    /// Filled block in the player colour.
    Solid,
}

impl PlayerSkin {
    /// Read text art from `path`; fall back to a solid block if it can't be read.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return PlayerSkin::Solid;
        };
        match std::fs::read_to_string(path) {
            Ok(text) if !text.trim().is_empty() => {
                log::info!("loaded player sprite {}", path.display());
                PlayerSkin::Sprite(text.lines().map(str::to_owned).collect())
            }
            Ok(_) => {
                log::warn!("player sprite {} is empty, using solid block", path.display());
                PlayerSkin::Solid
            }
            Err(e) => {
                log::warn!(
                    "failed to load player sprite {} ({}), using solid block",
                    path.display(),
                    e
                );
                PlayerSkin::Solid
            }
        }
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Terminal geometry.  Row 0 is the HUD, the last row the controls hint,
/// everything in between shows the viewport.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub cols: u16,
    pub rows: u16,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    fn play_rows(&self) -> f32 {
        f32::from(self.rows.saturating_sub(2))
    }

    fn col(&self, x: f32, state: &GameState) -> i32 {
        (x / state.tuning.viewport_width * f32::from(self.cols)).floor() as i32
    }

    fn row(&self, y: f32, state: &GameState) -> i32 {
        1 + (y / state.tuning.viewport_height * self.play_rows()).floor() as i32
    }

    fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < i32::from(self.cols) && row >= 1 && row <= self.play_rows() as i32
    }
}

/// Fill the cells covered by `rect` with `glyph`, clipped to the play area.
fn fill_rect<W: Write>(
    out: &mut W,
    screen: Screen,
    state: &GameState,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let c0 = screen.col(rect.left(), state);
    let c1 = screen.col(rect.right(), state).max(c0 + 1);
    let r0 = screen.row(rect.top(), state);
    let r1 = screen.row(rect.bottom(), state).max(r0 + 1);

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        let cols: Vec<i32> = (c0..c1).filter(|&c| screen.in_bounds(c, row)).collect();
        let Some(&first) = cols.first() else {
            continue;
        };
        out.queue(cursor::MoveTo(first as u16, row as u16))?;
        out.queue(Print(glyph.to_string().repeat(cols.len())))?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    skin: &PlayerSkin,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_floor(out, state, screen)?;
    draw_player(out, state, skin, screen)?;
    for enemy in &state.enemies {
        draw_enemy(out, state, enemy, screen)?;
    }
    for jumper in &state.jump_enemies {
        draw_jump_enemy(out, state, jumper, screen)?;
    }
    for item in &state.items {
        draw_item(out, state, item, screen)?;
    }
    for coin in &state.coins {
        draw_coin(out, state, coin, screen)?;
    }

    draw_hud(out, state, screen)?;
    draw_controls_hint(out, state, screen)?;

    if !state.is_running() {
        draw_game_over(out, state, screen)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Floor ─────────────────────────────────────────────────────────────────────

/// Two floor segments, at `scroll` and `scroll + width`, tile the ground.
fn draw_floor<W: Write>(out: &mut W, state: &GameState, screen: Screen) -> std::io::Result<()> {
    let t = &state.tuning;
    let floor = Rect::new(0.0, t.floor_y(), t.viewport_width, t.floor_margin);
    fill_rect(out, screen, state, &floor, '▀', C_FLOOR)?;

    let row = screen.row(t.floor_y(), state);
    for segment in [state.scroll, state.scroll + t.viewport_width] {
        let mut x = segment;
        while x < segment + t.viewport_width {
            let col = screen.col(x, state);
            if screen.in_bounds(col, row) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print("▄"))?;
            }
            x += FLOOR_MARK_SPACING;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameState,
    skin: &PlayerSkin,
    screen: Screen,
) -> std::io::Result<()> {
    let p = &state.player;
    let color = if p.power_up_active {
        C_PLAYER_POWERED
    } else {
        C_PLAYER
    };
    match skin {
        PlayerSkin::Solid => fill_rect(out, screen, state, &p.rect, '█', color),
        PlayerSkin::Sprite(lines) => {
            let col = screen.col(p.rect.left(), state);
            let top = screen.row(p.rect.top(), state);
            out.queue(style::SetForegroundColor(color))?;
            for (i, line) in lines.iter().enumerate() {
                let row = top + i as i32;
                if screen.in_bounds(col, row) {
                    out.queue(cursor::MoveTo(col as u16, row as u16))?;
                    out.queue(Print(line))?;
                }
            }
            Ok(())
        }
    }
}

fn draw_enemy<W: Write>(
    out: &mut W,
    state: &GameState,
    enemy: &Enemy,
    screen: Screen,
) -> std::io::Result<()> {
    let color = match enemy.kind {
        EnemyKind::Normal => C_ENEMY,
        EnemyKind::Big => C_ENEMY_BIG,
    };
    fill_rect(out, screen, state, &enemy.rect, '▓', color)
}

fn draw_jump_enemy<W: Write>(
    out: &mut W,
    state: &GameState,
    jumper: &EnemyJump,
    screen: Screen,
) -> std::io::Result<()> {
    let color = if jumper.glow { C_JUMPER_GLOW } else { C_ENEMY };
    fill_rect(out, screen, state, &jumper.rect(), '▒', color)
}

fn draw_item<W: Write>(
    out: &mut W,
    state: &GameState,
    item: &Item,
    screen: Screen,
) -> std::io::Result<()> {
    fill_rect(out, screen, state, &item.rect, '◆', C_ITEM)
}

/// A coin is one cell whose glyph follows the squash animation.
fn draw_coin<W: Write>(
    out: &mut W,
    state: &GameState,
    coin: &Coin,
    screen: Screen,
) -> std::io::Result<()> {
    let width = coin.squash_width();
    let glyph = if width > coin.radius * 1.4 {
        "O"
    } else if width > coin.radius * 0.6 {
        "o"
    } else {
        "|"
    };
    let col = screen.col(coin.x, state);
    let row = screen.row(coin.y, state);
    if screen.in_bounds(col, row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(C_COIN))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, screen: Screen) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score: {:>6}  Max Jumps: {}",
        state.score, state.player.max_jumps
    )))?;

    if state.player.power_up_active {
        let fps = state.tuning.fps.max(1);
        out.queue(style::SetForegroundColor(C_POWER))?;
        out.queue(Print(format!(
            "  Power Time: {}",
            state.player.power_up_frames / fps
        )))?;
    }

    let hi = format!("High Score: {}", state.high_score);
    let col = screen.cols.saturating_sub(hi.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(hi))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &GameState,
    screen: Screen,
) -> std::io::Result<()> {
    let hint = if state.is_running() {
        "SPACE : Jump   Q : Quit"
    } else {
        "R : Restart   Q : Quit"
    };
    out.queue(cursor::MoveTo(1, screen.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    screen: Screen,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let mut lines: Vec<(String, Color)> = vec![
        ("╔════════════════════════════════╗".to_string(), C_GAME_OVER),
        ("║ GAME OVER - Press R to Restart ║".to_string(), C_GAME_OVER),
        ("╚════════════════════════════════╝".to_string(), C_GAME_OVER),
        (score_line, C_HUD),
    ];
    if state.new_record {
        lines.push(("NEW HIGH SCORE!".to_string(), C_GAME_OVER));
    }

    let cx = screen.cols / 2;
    let start_row = (screen.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

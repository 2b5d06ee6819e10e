mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::SeedableRng;
use rand_pcg::Pcg64;

use jump_runner::audio::AudioManager;
use jump_runner::highscore::FileStore;
use jump_runner::{Command, Config, Game, GameError};

use crate::display::{PlayerSkin, Screen};

/// Smallest terminal the game is playable in.
const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode, so logs go to a file.  If the file can't be
/// created logging stays off.
fn init_logging(path: &Path) {
    let Ok(file) = File::create(path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key.  Input events are drained once at the top of each
/// frame; only key presses matter (repeats and releases are ignored).
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game<FileStore, AudioManager, Pcg64>,
    skin: &PlayerSkin,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let fps = game.state().tuning.fps.max(1);
    let frame = Duration::from_secs(1) / fps;

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char(' ') | KeyCode::Up => game.handle(Command::Jump),
                KeyCode::Char('r') | KeyCode::Char('R') => game.handle(Command::Restart),
                _ => {}
            }
        }

        game.update();

        let (cols, rows) = terminal::size()?;
        display::render(out, game.state(), skin, Screen::new(cols, rows))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_logging(&config.log_path);
    log::info!("config: {}", config.source);

    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(GameError::Terminal(format!(
            "terminal is {}x{}, need at least {}x{}",
            cols, rows, MIN_COLS, MIN_ROWS
        ))
        .into());
    }

    let skin = PlayerSkin::load(config.player_sprite.as_deref());
    let rng = match config.seed {
        Some(seed) => {
            log::info!("using fixed seed {}", seed);
            Pcg64::seed_from_u64(seed)
        }
        None => Pcg64::from_entropy(),
    };
    let audio = if config.audio {
        AudioManager::new(Box::new(stdout()))
    } else {
        AudioManager::disabled()
    };
    let store = FileStore::new(config.high_score_path.clone());
    let mut game = Game::new(config.tuning.clone(), store, audio, rng);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    log::info!("starting, high score {}", game.state().high_score);
    let result = game_loop(&mut out, &mut game, &skin, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("exiting, high score {}", game.state().high_score);
    result
}

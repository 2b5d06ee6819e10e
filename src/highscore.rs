//! High-score persistence.  A single integer, stored as text.

use std::path::{Path, PathBuf};

use crate::error::GameError;

pub trait HighScoreStore {
    /// Stored value, or 0 when missing or unreadable.
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<(), GameError>;
}

// ── File ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u32 {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                log::info!("no high score at {} ({}), starting at 0", self.path.display(), e);
                return 0;
            }
        };
        match text.trim().parse() {
            Ok(score) => {
                log::info!("loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(_) => {
                log::warn!("corrupt high score file {}, treating as 0", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), GameError> {
        std::fs::write(&self.path, score.to_string()).map_err(|source| GameError::HighScore {
            path: self.path.clone(),
            source,
        })?;
        log::info!("saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

// ── Memory ────────────────────────────────────────────────────────────────────

/// In-process store, for tests and for runs without a writable disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub value: u32,
    /// Every value ever saved, oldest first.
    pub writes: Vec<u32>,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        Self {
            value,
            writes: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) -> Result<(), GameError> {
        self.value = score;
        self.writes.push(score);
        Ok(())
    }
}

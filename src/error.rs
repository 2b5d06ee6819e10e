//! Error types shared by the library and the terminal frontend.

use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write high score to {path}: {source}")]
    HighScore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(String),
}

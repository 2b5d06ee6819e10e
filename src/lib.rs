//! Jump Runner: a side-scrolling arcade game for the terminal.
//!
//! The simulation (`entities`, `spawner`, `collision`, `compute`) is pure and
//! frame-stepped; `controller` ties it to persistence and audio.  Terminal
//! rendering and input live in the binary.

pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod controller;
pub mod entities;
pub mod error;
pub mod highscore;
pub mod spawner;

pub use config::{Config, Tuning};
pub use controller::{Command, Game};
pub use error::GameError;

//! Command-line configuration.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::Playfield;
use crate::error::GameResult;

/// Terminal wave shooter
#[derive(Parser, Debug, Clone)]
#[command(name = "wave_shooter")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Playfield width in cells
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    pub width: u16,

    /// Playfield height in cells
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    pub height: u16,

    /// Seed for enemy placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// File the log is written to (the terminal is busy drawing the game)
    #[arg(long, default_value = "wave_shooter.log")]
    pub log_file: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Disable logging entirely
    #[arg(long)]
    pub no_log: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Validated playfield for this run.
    pub fn playfield(&self) -> GameResult<Playfield> {
        Playfield::new(self.width, self.height)
    }

    /// File to log into, or `None` with `--no-log` so no file is created.
    pub fn log_target(&self) -> Option<&Path> {
        if self.no_log {
            None
        } else {
            Some(self.log_file.as_path())
        }
    }

    /// Effective log filter; `Off` when logging is disabled.
    pub fn level_filter(&self) -> LevelFilter {
        if self.no_log {
            LevelFilter::Off
        } else {
            self.log_level.into()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            seed: None,
            log_file: PathBuf::from("wave_shooter.log"),
            log_level: LogLevel::Info,
            no_log: false,
        }
    }
}

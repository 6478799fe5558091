use thiserror::Error;

/// Everything that can stop the game before or outside the frame loop.
/// The simulation itself never fails.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Terminal must be at least {needed_w}x{needed_h} (current: {actual_w}x{actual_h})")]
    TerminalTooSmall {
        needed_w: u16,
        needed_h: u16,
        actual_w: u16,
        actual_h: u16,
    },

    #[error("Playfield {width}x{height} is too small to play on")]
    InvalidPlayfield { width: u16, height: u16 },

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to set up logging: {0}")]
    Logging(String),
}

pub type GameResult<T> = Result<T, GameError>;

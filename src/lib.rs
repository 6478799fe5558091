//! Terminal wave shooter: a ship on the bottom row against waves of
//! bouncing, descending enemies.
//!
//! The library holds the whole simulation plus the presenter; the binary
//! only owns the terminal, the frame pacing and the game-over prompt.

pub mod clock;
pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod player;
pub mod pool;
pub mod wave;

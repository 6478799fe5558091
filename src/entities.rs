//! All game entity types: pure data with a few bounds helpers.

use crate::constants::ENEMY_LEN;
use crate::error::{GameError, GameResult};
use crate::pool::Slot;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Why the last session ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameOverCause {
    Destroyed,
    Quit,
}

// ── Playfield ─────────────────────────────────────────────────────────────────

/// Fixed rectangle with a one-cell border; the playable interior is
/// `[1, width-2] × [1, height-2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: u16,
    pub height: u16,
}

impl Playfield {
    pub fn new(width: u16, height: u16) -> GameResult<Self> {
        if (width as i32) < ENEMY_LEN + 2 || height < 5 {
            return Err(GameError::InvalidPlayfield { width, height });
        }
        Ok(Playfield { width, height })
    }

    pub fn player_min_x(&self) -> i32 {
        1
    }

    pub fn player_max_x(&self) -> i32 {
        self.width as i32 - 2
    }

    /// Leftmost column an enemy sprite may start at.
    pub fn enemy_min_x(&self) -> i32 {
        1
    }

    /// Rightmost column an enemy sprite may start at.
    pub fn enemy_max_x(&self) -> i32 {
        (self.width as i32 - 2) - (ENEMY_LEN - 1)
    }

    pub fn player_row(&self) -> i32 {
        self.height as i32 - 2
    }

    /// Enemies reaching this row have escaped past the player.
    pub fn bottom_row(&self) -> i32 {
        self.height as i32 - 1
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub active: bool,
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// `xf`/`yf` are the source of truth; `x`/`y` are rounded from them every
/// frame for drawing and collisions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub xf: f32,
    pub yf: f32,
    /// -1 (left) or +1 (right).
    pub direction: i32,
    pub active: bool,
}

impl Enemy {
    /// True when the cell `(x, y)` lies on this enemy's sprite.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        y == self.y && x >= self.x && x < self.x + ENEMY_LEN
    }
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

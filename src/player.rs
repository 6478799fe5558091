use log::trace;

use crate::constants::{MAX_BULLETS, PLAYER_FIRE_COOLDOWN_S, PLAYER_SPEED_CPS, PLAYER_START_HEALTH};
use crate::entities::{Bullet, Playfield};
use crate::input::InputLatch;
use crate::pool::SlotPool;

/// The player's ship. `xf` accumulates sub-cell motion; `x` is what gets
/// drawn and collided.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub x: i32,
    pub y: i32,
    pub xf: f32,
    pub health: u32,
    pub score: u32,
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,
}

impl PlayerState {
    pub fn new(playfield: &Playfield) -> Self {
        let x = playfield.width as i32 / 2;
        PlayerState {
            x,
            y: playfield.player_row(),
            xf: x as f32,
            health: PLAYER_START_HEALTH,
            score: 0,
            fire_cooldown: 0.0,
        }
    }

    /// Apply latched intent for one frame: slide, cool down, maybe fire.
    /// A shot is silently dropped when the bullet pool is full.
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        input: &mut InputLatch,
        playfield: &Playfield,
        bullets: &mut SlotPool<Bullet, MAX_BULLETS>,
    ) {
        if input.is_moving(now) {
            self.xf += input.move_dir as f32 * PLAYER_SPEED_CPS * dt;
        }
        self.xf = self.xf.clamp(
            playfield.player_min_x() as f32,
            playfield.player_max_x() as f32,
        );
        self.x = (self.xf + 0.5) as i32;

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);

        if input.is_firing(now) && self.fire_cooldown <= 0.0 {
            if let Some(slot) = bullets.allocate() {
                *slot = Bullet { x: self.x, y: self.y - 1, active: true };
            } else {
                trace!("bullet pool full, shot dropped");
            }
            self.fire_cooldown = PLAYER_FIRE_COOLDOWN_S;
        }
        input.consume_fire_press();
    }

    /// Lose one point of health. Returns `true` when that was the last one.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}

//! Wave bookkeeping and the shared enemy speed.

use crate::constants::{
    frame_rate_approx, ENEMIES_PER_WAVE, ENEMY_MOVE_BASE, ENEMY_MOVE_MIN, ENEMY_MOVE_WAVE_DIV,
    ENEMY_SPAWN_BASE, ENEMY_SPAWN_MIN, ENEMY_SPAWN_WAVE_STEP, ENEMY_SPEED_SLEW_CPS2,
};

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Enemies that must be spawned (and then removed) to finish `wave`.
pub fn enemies_in_wave(wave: u32) -> u32 {
    wave * ENEMIES_PER_WAVE
}

/// Frames between spawns.
pub fn spawn_interval_frames(wave: u32) -> u32 {
    ENEMY_SPAWN_BASE
        .saturating_sub(wave * ENEMY_SPAWN_WAVE_STEP)
        .max(ENEMY_SPAWN_MIN)
}

/// Frames an enemy would take per cell at the nominal frame rate; smaller is
/// faster.
pub fn move_delay_frames(wave: u32) -> u32 {
    ENEMY_MOVE_BASE
        .saturating_sub(wave / ENEMY_MOVE_WAVE_DIV)
        .max(ENEMY_MOVE_MIN)
}

/// Enemy speed the slew converges on, in cells per second.
pub fn target_speed_cps(wave: u32) -> f32 {
    frame_rate_approx() / move_delay_frames(wave) as f32
}

// ── Wave controller ──────────────────────────────────────────────────────────

/// Invariant: `defeated <= spawned <= enemies_in_wave(wave)`.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveController {
    pub wave: u32,
    pub spawned: u32,
    pub defeated: u32,
    pub spawn_counter: u32,
}

impl WaveController {
    pub fn new() -> Self {
        WaveController { wave: 1, spawned: 0, defeated: 0, spawn_counter: 0 }
    }

    pub fn quota(&self) -> u32 {
        enemies_in_wave(self.wave)
    }

    pub fn spawn_interval(&self) -> u32 {
        spawn_interval_frames(self.wave)
    }

    pub fn move_delay_frames(&self) -> u32 {
        move_delay_frames(self.wave)
    }

    pub fn target_speed(&self) -> f32 {
        target_speed_cps(self.wave)
    }

    /// Count one frame and report whether a spawn should be attempted now.
    pub fn spawn_due(&mut self) -> bool {
        self.spawn_counter = self.spawn_counter.saturating_add(1);
        self.spawn_counter >= self.spawn_interval() && self.spawned < self.quota()
    }

    pub fn record_spawn(&mut self) {
        self.spawned += 1;
        self.spawn_counter = 0;
    }

    /// No free slot: pin the counter so the attempt repeats next frame.
    pub fn defer_spawn(&mut self) {
        self.spawn_counter = self.spawn_interval();
    }

    pub fn record_defeat(&mut self) {
        self.defeated = (self.defeated + 1).min(self.spawned);
    }

    pub fn is_complete(&self) -> bool {
        self.spawned >= self.quota() && self.defeated >= self.spawned
    }

    /// Move on to the next wave with fresh counters.
    pub fn advance(&mut self) {
        self.wave += 1;
        self.spawned = 0;
        self.defeated = 0;
        self.spawn_counter = 0;
    }
}

impl Default for WaveController {
    fn default() -> Self {
        Self::new()
    }
}

// ── Enemy speed slew ─────────────────────────────────────────────────────────

/// Speed shared by every enemy. It ramps toward the wave's target at no more
/// than `ENEMY_SPEED_SLEW_CPS2` instead of jumping.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpeed {
    pub current: f32,
    pub target: f32,
}

impl EnemySpeed {
    /// Start already at the target for `wave`.
    pub fn new(wave: u32) -> Self {
        let target = target_speed_cps(wave);
        EnemySpeed { current: target, target }
    }

    /// Slew toward the target for `wave` and return this frame's motion in
    /// cells.
    pub fn step(&mut self, wave: u32, dt: f32) -> f32 {
        self.target = target_speed_cps(wave);
        let max_delta = ENEMY_SPEED_SLEW_CPS2 * dt;
        let diff = self.target - self.current;
        self.current += diff.clamp(-max_delta, max_delta);
        self.current * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_interval_shrinks_to_floor() {
        assert_eq!(spawn_interval_frames(1), 32);
        assert_eq!(spawn_interval_frames(2), 29);
        assert_eq!(spawn_interval_frames(9), 10);
        assert_eq!(spawn_interval_frames(50), 10);
    }

    #[test]
    fn move_delay_shrinks_to_floor() {
        assert_eq!(move_delay_frames(1), 20);
        assert_eq!(move_delay_frames(5), 19);
        assert_eq!(move_delay_frames(90), 2);
        assert_eq!(move_delay_frames(1000), 2);
    }

    #[test]
    fn slew_is_rate_limited() {
        let mut speed = EnemySpeed::new(1);
        speed.current = 0.0;
        let dt = 0.05;
        let delta = speed.step(1, dt);
        let max = ENEMY_SPEED_SLEW_CPS2 * dt;
        assert!((speed.current - max).abs() < 1e-6);
        assert!((delta - max * dt).abs() < 1e-6);
    }

    #[test]
    fn slew_settles_on_target() {
        let mut speed = EnemySpeed::new(1);
        speed.current = 0.0;
        for _ in 0..1000 {
            speed.step(1, 0.016);
        }
        assert!((speed.current - target_speed_cps(1)).abs() < 1e-4);
    }
}

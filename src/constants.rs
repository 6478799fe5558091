// --- Playfield ---
pub const SCREEN_WIDTH: u16 = 160;
pub const SCREEN_HEIGHT: u16 = 45;

// --- Pools ---
pub const MAX_ENEMIES: usize = 5;
pub const MAX_BULLETS: usize = 30;

// --- Player ---
pub const PLAYER_START_HEALTH: u32 = 3;
pub const PLAYER_SPEED_CPS: f32 = 35.0; // Cells per second
pub const PLAYER_FIRE_COOLDOWN_S: f32 = 0.12;
pub const MOVE_HOLD_GRACE_S: f64 = 0.45;
pub const SHOOT_HOLD_GRACE_S: f64 = 0.20;

// --- Enemies ---
pub const ENEMY_LEN: i32 = 4; // Sprite width in cells
pub const ENEMY_GLYPH: char = '$';
pub const ENEMY_MOVE_BASE: u32 = 20; // Frames
pub const ENEMY_MOVE_MIN: u32 = 2;
pub const ENEMY_MOVE_WAVE_DIV: u32 = 5;
pub const ENEMY_SPAWN_BASE: u32 = 35; // Frames
pub const ENEMY_SPAWN_MIN: u32 = 10;
pub const ENEMY_SPAWN_WAVE_STEP: u32 = 3;
pub const ENEMY_SPEED_SLEW_CPS2: f32 = 6.0;

// --- Waves & scoring ---
pub const ENEMIES_PER_WAVE: u32 = 5; // Multiplied by the wave number
pub const SCORE_PER_ENEMY: u32 = 10;

// --- Frame loop ---
pub const FRAME_DELAY_MS: u64 = 16;
pub const MAX_DT_S: f32 = 0.05;
pub const MAX_INPUTS_PER_FRAME: usize = 32;

/// Frame rate implied by the pacing sleep; enemy speeds are tuned in frames.
pub fn frame_rate_approx() -> f32 {
    1000.0 / FRAME_DELAY_MS as f32
}

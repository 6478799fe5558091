//! Game-logic functions driving one session.
//!
//! All state lives in a single `GameState` owned by the caller and passed by
//! mutable reference. Randomness comes in through an injected RNG so tests
//! can use a seeded one.

use log::{debug, info};
use rand::Rng;

use crate::constants::{MAX_BULLETS, MAX_ENEMIES, SCORE_PER_ENEMY};
use crate::entities::{Bullet, Enemy, GameOverCause, GameStatus, Playfield};
use crate::input::{InputLatch, Key};
use crate::player::PlayerState;
use crate::pool::SlotPool;
use crate::wave::{EnemySpeed, WaveController};

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameState {
    pub playfield: Playfield,
    pub player: PlayerState,
    pub input: InputLatch,
    pub bullets: SlotPool<Bullet, MAX_BULLETS>,
    pub enemies: SlotPool<Enemy, MAX_ENEMIES>,
    pub wave: WaveController,
    pub enemy_speed: EnemySpeed,
    pub status: GameStatus,
    /// Set once `status` becomes `GameOver`.
    pub cause: Option<GameOverCause>,
    pub frame: u64,
}

/// What the player picked on the game-over screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionChoice {
    Restart,
    Quit,
}

/// Map a key pressed on the game-over screen to a choice; other keys are
/// ignored.
pub fn game_over_choice(key: Key) -> Option<SessionChoice> {
    match key {
        Key::Char('r') => Some(SessionChoice::Restart),
        Key::Char('q') | Key::Esc => Some(SessionChoice::Quit),
        _ => None,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session on `playfield`: wave 1, full health, empty pools.
pub fn init_state(playfield: Playfield) -> GameState {
    let wave = WaveController::new();
    let enemy_speed = EnemySpeed::new(wave.wave);
    GameState {
        playfield,
        player: PlayerState::new(&playfield),
        input: InputLatch::new(),
        bullets: SlotPool::new(),
        enemies: SlotPool::new(),
        wave,
        enemy_speed,
        status: GameStatus::Playing,
        cause: None,
        frame: 0,
    }
}

/// Re-initialise `state` in place for a restart.
pub fn reset_state(state: &mut GameState) {
    state.player = PlayerState::new(&state.playfield);
    state.input.reset();
    state.bullets.clear();
    state.enemies.clear();
    state.wave = WaveController::new();
    state.enemy_speed = EnemySpeed::new(state.wave.wave);
    state.status = GameStatus::Playing;
    state.cause = None;
    state.frame = 0;
    info!("Session restarted");
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `dt` seconds at time `now`.
///
/// Order: player, bullets, enemies (spawn then move), collisions and wave
/// advance. Does nothing once the session is over.
pub fn tick<R: Rng>(state: &mut GameState, dt: f32, now: f64, rng: &mut R) {
    if state.status != GameStatus::Playing {
        return;
    }
    if state.input.quit_requested {
        end_session(state, GameOverCause::Quit);
        return;
    }
    state.frame += 1;

    let playfield = state.playfield;
    state
        .player
        .update(dt, now, &mut state.input, &playfield, &mut state.bullets);

    update_bullets(state);
    update_enemies(state, dt, rng);
    resolve_collisions(state);
}

/// Move every bullet one row up; bullets reaching the top border vanish.
pub fn update_bullets(state: &mut GameState) {
    for (_, bullet) in state.bullets.iter_active_mut() {
        bullet.y -= 1;
        if bullet.y <= 0 {
            bullet.active = false;
        }
    }
}

pub fn update_enemies<R: Rng>(state: &mut GameState, dt: f32, rng: &mut R) {
    spawn_enemies_this_frame(state, rng);
    let delta = state.enemy_speed.step(state.wave.wave, dt);
    move_enemies(state, delta);
}

/// Run the wave's spawn timer and place an enemy when one is due. A full
/// pool defers the spawn without counting it.
pub fn spawn_enemies_this_frame<R: Rng>(state: &mut GameState, rng: &mut R) {
    if !state.wave.spawn_due() {
        return;
    }
    if spawn_enemy(state, rng) {
        state.wave.record_spawn();
    } else {
        debug!("enemy pool full, spawn deferred");
        state.wave.defer_spawn();
    }
}

/// Place a new enemy in the first free slot. Returns `false` when the pool
/// is full.
pub fn spawn_enemy<R: Rng>(state: &mut GameState, rng: &mut R) -> bool {
    let min_x = state.playfield.enemy_min_x();
    let max_x = state.playfield.enemy_max_x();
    if max_x < min_x {
        return false;
    }
    let Some(slot) = state.enemies.allocate() else {
        return false;
    };
    let x = rng.gen_range(min_x..=max_x);
    let direction = if rng.gen_bool(0.5) { 1 } else { -1 };
    *slot = Enemy {
        x,
        y: 1,
        xf: x as f32,
        yf: 1.0,
        direction,
        active: true,
    };
    debug!("enemy spawned at column {} heading {}", x, direction);
    true
}

/// Move every enemy by `delta` cells, bouncing off the side walls. Enemies
/// reaching the bottom row are removed and cost the player one health.
pub fn move_enemies(state: &mut GameState, delta: f32) {
    let min_x = state.playfield.enemy_min_x() as f32;
    let max_x = state.playfield.enemy_max_x() as f32;
    let bottom = state.playfield.bottom_row();
    let mut escaped = 0;

    for (_, enemy) in state.enemies.iter_active_mut() {
        enemy.xf += enemy.direction as f32 * delta;
        enemy.yf += delta;

        if enemy.xf <= min_x {
            enemy.xf = min_x;
            enemy.direction = 1;
        } else if enemy.xf >= max_x {
            enemy.xf = max_x;
            enemy.direction = -1;
        }

        enemy.x = (enemy.xf + 0.5) as i32;
        enemy.y = (enemy.yf + 0.5) as i32;

        if enemy.y >= bottom {
            enemy.active = false;
            escaped += 1;
        }
    }

    for _ in 0..escaped {
        debug!("enemy reached the bottom");
        state.wave.record_defeat();
        damage_player(state);
    }
}

// ── Collisions & waves ───────────────────────────────────────────────────────

pub fn resolve_collisions(state: &mut GameState) {
    handle_bullet_enemy_collisions(state);
    handle_enemy_player_collisions(state);
    advance_wave_if_complete(state);
}

/// Each bullet destroys at most one enemy; the first enemy in pool order
/// wins.
pub fn handle_bullet_enemy_collisions(state: &mut GameState) {
    for (_, bullet) in state.bullets.iter_active_mut() {
        let hit = state
            .enemies
            .iter_active_mut()
            .find(|(_, enemy)| enemy.covers(bullet.x, bullet.y));
        if let Some((index, enemy)) = hit {
            bullet.active = false;
            enemy.active = false;
            state.wave.record_defeat();
            state.player.award(SCORE_PER_ENEMY);
            debug!("enemy {} shot down at ({}, {})", index, bullet.x, bullet.y);
        }
    }
}

pub fn handle_enemy_player_collisions(state: &mut GameState) {
    let (px, py) = (state.player.x, state.player.y);
    let mut rammed = 0;
    for (_, enemy) in state.enemies.iter_active_mut() {
        if enemy.covers(px, py) {
            enemy.active = false;
            rammed += 1;
        }
    }
    for _ in 0..rammed {
        debug!("enemy rammed the player");
        state.wave.record_defeat();
        damage_player(state);
    }
}

/// Start the next wave once every enemy of this one has been spawned and
/// removed. Both pools are wiped so the new wave starts clean.
pub fn advance_wave_if_complete(state: &mut GameState) {
    if !state.wave.is_complete() {
        return;
    }
    state.wave.advance();
    state.bullets.clear();
    state.enemies.clear();
    info!("Wave {} begins (score {})", state.wave.wave, state.player.score);
}

fn damage_player(state: &mut GameState) {
    if state.status != GameStatus::Playing {
        return;
    }
    if state.player.take_hit() {
        end_session(state, GameOverCause::Destroyed);
    }
}

fn end_session(state: &mut GameState, cause: GameOverCause) {
    state.status = GameStatus::GameOver;
    state.cause = Some(cause);
    info!(
        "Game over ({:?}): score {}, wave {}",
        cause, state.player.score, state.wave.wave
    );
}

use rand::rngs::StdRng;
use rand::SeedableRng;

use wave_shooter::clock::{Clock, FrameTimer, ManualClock};
use wave_shooter::compute::*;
use wave_shooter::display::{render, render_game_over, GridCanvas};
use wave_shooter::entities::*;
use wave_shooter::input::{Key, ScriptedKeys};

/// Headless frame loop: clock, drain, tick, render. No pacing sleep.
struct Harness {
    state: GameState,
    clock: ManualClock,
    timer: FrameTimer,
    keys: ScriptedKeys,
    canvas: GridCanvas,
    rng: StdRng,
}

impl Harness {
    fn new() -> Self {
        let clock = ManualClock::new(100.0);
        let timer = FrameTimer::new(clock.now());
        Harness {
            state: init_state(Playfield::new(40, 20).unwrap()),
            clock,
            timer,
            keys: ScriptedKeys::default(),
            canvas: GridCanvas::new(40, 21),
            rng: StdRng::seed_from_u64(3),
        }
    }

    fn frame(&mut self, step: f64) {
        self.clock.advance(step);
        let now = self.clock.now();
        let dt = self.timer.tick(now);
        self.state.input.drain(&mut self.keys, now).unwrap();
        tick(&mut self.state, dt, now, &mut self.rng);
        render(&mut self.canvas, &self.state, 21).unwrap();
    }
}

#[test]
fn held_key_moves_ship_across_frames() {
    let mut h = Harness::new();
    // Key repeat arrives every third frame; the grace window bridges the gaps
    for i in 0..40 {
        if i % 3 == 0 {
            h.keys.push(Key::Char('d'));
        }
        h.frame(0.016);
    }
    // 40 frames * 0.016s * 35 cells/s = 22.4 cells, clamped at the wall
    assert_eq!(h.state.player.x, 38);
    assert_eq!(h.canvas.char_at(38, 18), Some('^'));
}

#[test]
fn released_key_stops_ship() {
    let mut h = Harness::new();
    h.keys.push(Key::Char('a'));
    for _ in 0..60 {
        h.frame(0.016);
    }
    // Only the 0.45s grace window of motion: about 15 cells
    let x = h.state.player.x;
    assert!(x < 20 && x >= 2, "x = {x}");
    let after = h.state.player.x;
    h.frame(0.016);
    assert_eq!(h.state.player.x, after);
}

#[test]
fn shots_travel_up_the_screen() {
    let mut h = Harness::new();
    h.keys.push(Key::Char(' '));
    h.frame(0.016);
    // Spawned at row 17 and moved once in the same frame
    assert_eq!(h.canvas.char_at(20, 16), Some('|'));

    for _ in 0..5 {
        h.frame(0.016);
    }
    assert_eq!(h.canvas.char_at(20, 11), Some('|'));
}

#[test]
fn stall_is_clamped_to_one_short_step() {
    let mut h = Harness::new();
    h.keys.push(Key::Char('d'));
    h.frame(3.0); // a long pause must not teleport the ship
    // At most MAX_DT_S of motion: 0.05 * 35 = 1.75 cells
    assert_eq!(h.state.player.x, 22);
}

#[test]
fn quit_then_restart() {
    let mut h = Harness::new();
    for _ in 0..40 {
        h.frame(0.016);
    }
    assert_eq!(h.state.enemies.active_count(), 1);

    h.keys.push(Key::Char('q'));
    h.frame(0.016);
    assert_eq!(h.state.status, GameStatus::GameOver);
    assert_eq!(h.state.cause, Some(GameOverCause::Quit));

    let mut screen = GridCanvas::new(40, 20);
    render_game_over(&mut screen, &h.state).unwrap();
    assert_eq!(screen.row(7).trim(), "GAME OVER!");

    assert_eq!(game_over_choice(Key::Char('r')), Some(SessionChoice::Restart));
    reset_state(&mut h.state);
    assert_eq!(h.state.status, GameStatus::Playing);
    assert_eq!(h.state.enemies.active_count(), 0);

    h.frame(0.016);
    assert_eq!(h.state.frame, 1);
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut h = Harness::new();
        for i in 0..400 {
            if i % 7 == 0 {
                h.keys.push(Key::Char(' '));
            }
            if i % 50 < 25 {
                h.keys.push(Key::Char('a'));
            } else {
                h.keys.push(Key::Char('d'));
            }
            h.frame(0.016);
        }
        (h.state.player.score, h.state.wave.clone(), h.canvas.grid.clone())
    };
    assert_eq!(run(), run());
}

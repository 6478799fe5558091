mod terminal;

use std::io::{stdout, BufWriter, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wave_shooter::clock::{Clock, FrameTimer, MonotonicClock};
use wave_shooter::compute::{game_over_choice, init_state, reset_state, tick, GameState, SessionChoice};
use wave_shooter::config::Config;
use wave_shooter::constants::FRAME_DELAY_MS;
use wave_shooter::display::{self, Canvas, TerminalCanvas};
use wave_shooter::entities::GameStatus;
use wave_shooter::error::{GameError, GameResult};
use wave_shooter::input::KeySource;

use crate::terminal::TerminalKeys;

const FRAME: Duration = Duration::from_millis(FRAME_DELAY_MS); // ≈60 FPS

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until the session ends (health gone or quit pressed).
///
/// Per frame: read the clock, drain queued keys into the latch, advance the
/// simulation, draw, then sleep for whatever is left of the frame budget.
/// The terminal height is re-read every frame so a resize shows or hides the
/// controls hint.
fn game_loop<C: Canvas, K: KeySource, R: Rng>(
    canvas: &mut C,
    keys: &mut K,
    clock: &impl Clock,
    rng: &mut R,
    state: &mut GameState,
) -> GameResult<()> {
    let mut timer = FrameTimer::new(clock.now());

    while state.status == GameStatus::Playing {
        let frame_start = Instant::now();
        let now = clock.now();
        let dt = timer.tick(now);

        state.input.drain(keys, now)?;
        tick(state, dt, now, rng);
        display::render(canvas, state, terminal::rows()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
    Ok(())
}

/// Show the result and block until the player restarts or quits.
fn game_over_prompt<C: Canvas>(canvas: &mut C, state: &GameState) -> GameResult<SessionChoice> {
    display::render_game_over(canvas, state)?;
    loop {
        if let Some(choice) = game_over_choice(terminal::wait_key()?) {
            return Ok(choice);
        }
    }
}

fn run<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    config: &Config,
    state: &mut GameState,
) -> GameResult<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock = MonotonicClock::new();
    let mut keys = TerminalKeys;

    loop {
        game_loop(canvas, &mut keys, &clock, &mut rng, state)?;
        match game_over_prompt(canvas, state)? {
            SessionChoice::Restart => reset_state(state),
            SessionChoice::Quit => break,
        }
    }
    Ok(())
}

fn init_logging(config: &Config) -> GameResult<()> {
    let Some(path) = config.log_target() else {
        return Ok(());
    };
    simple_logging::log_to_file(path, config.level_filter())
        .map_err(|e| GameError::Logging(e.to_string()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn start(config: &Config) -> GameResult<()> {
    let playfield = config.playfield()?;
    terminal::check_size(&playfield)?;

    let mut state = init_state(playfield);
    info!(
        "Starting session on a {}x{} playfield (seed: {:?})",
        playfield.width, playfield.height, config.seed
    );

    let mut canvas = TerminalCanvas::new(BufWriter::new(stdout()));
    let result = match terminal::enter(canvas.get_mut()) {
        Ok(()) => run(&mut canvas, config, &mut state),
        Err(e) => Err(e.into()),
    };

    // Always restore the terminal
    terminal::restore(canvas.get_mut());
    info!("Final score {}, wave {}", state.player.score, state.wave.wave);
    result
}

fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(e) = init_logging(&config) {
        eprintln!("{}", e);
    }

    match start(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

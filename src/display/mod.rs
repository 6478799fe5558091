//! Rendering layer.
//!
//! Drawing goes through the `Canvas` trait: the game writes cells and text,
//! then calls `present` once per frame so the terminal sees a single flush.
//! No game logic is performed; this module only translates state into cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::GameState;
use crate::constants::{ENEMY_GLYPH, ENEMY_LEN};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;

const PLAYER_GLYPH: char = '^';
const BULLET_GLYPH: char = '|';
const CONTROLS_HINT: &str = "A/D: Move | Space: Shoot | Q: Quit";

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Character-grid sink. Coordinates are `(column, row)`.
pub trait Canvas {
    fn put(&mut self, x: u16, y: u16, glyph: char, color: Color) -> std::io::Result<()>;

    /// `len` copies of `glyph` starting at `(x, y)`.
    fn hline(&mut self, x: u16, y: u16, len: u16, glyph: char, color: Color) -> std::io::Result<()> {
        for i in 0..len {
            self.put(x + i, y, glyph, color)?;
        }
        Ok(())
    }

    fn text(&mut self, x: u16, y: u16, s: &str, color: Color) -> std::io::Result<()>;

    fn clear(&mut self) -> std::io::Result<()>;

    /// Push everything written since the last `present` to the screen.
    fn present(&mut self) -> std::io::Result<()>;
}

/// Queues crossterm commands on `out` and flushes them in `present`.
pub struct TerminalCanvas<W: Write> {
    out: W,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W) -> Self {
        TerminalCanvas { out }
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn put(&mut self, x: u16, y: u16, glyph: char, color: Color) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    fn hline(&mut self, x: u16, y: u16, len: u16, glyph: char, color: Color) -> std::io::Result<()> {
        let line: String = std::iter::repeat(glyph).take(len as usize).collect();
        self.text(x, y, &line, color)
    }

    fn text(&mut self, x: u16, y: u16, s: &str, color: Color) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(s))?;
        Ok(())
    }

    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

/// In-memory grid for headless rendering; colours are dropped.
#[derive(Clone, Debug)]
pub struct GridCanvas {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub presented: u32,
}

impl GridCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        GridCanvas {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            presented: 0,
        }
    }

    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    pub fn row(&self, y: u16) -> String {
        self.grid
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }
}

impl Canvas for GridCanvas {
    fn put(&mut self, x: u16, y: u16, glyph: char, _color: Color) -> std::io::Result<()> {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = glyph;
        }
        Ok(())
    }

    fn text(&mut self, x: u16, y: u16, s: &str, color: Color) -> std::io::Result<()> {
        for (i, c) in s.chars().enumerate() {
            self.put(x.saturating_add(i as u16), y, c, color)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> std::io::Result<()> {
        for row in self.grid.iter_mut() {
            row.fill(' ');
        }
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame. `term_rows` is the terminal height; the
/// controls hint only fits when it exceeds the playfield.
pub fn render<C: Canvas>(canvas: &mut C, state: &GameState, term_rows: u16) -> std::io::Result<()> {
    canvas.clear()?;

    draw_border(canvas, state)?;
    draw_player(canvas, state)?;
    draw_enemies(canvas, state)?;
    draw_bullets(canvas, state)?;
    draw_hud(canvas, state, term_rows)?;

    canvas.present()
}

/// Final screen with the result and the restart / quit prompt.
pub fn render_game_over<C: Canvas>(canvas: &mut C, state: &GameState) -> std::io::Result<()> {
    canvas.clear()?;

    let score_line = format!("Final Score: {}", state.player.score);
    let wave_line = format!("Wave Reached: {}", state.wave.wave);
    let cy = (state.playfield.height / 2) as i32;
    let lines: [(i32, &str, Color); 5] = [
        (cy - 3, "GAME OVER!", C_GAME_OVER),
        (cy - 1, &score_line, C_HUD_SCORE),
        (cy, &wave_line, C_HUD_WAVE),
        (cy + 2, "Press R to restart", Color::White),
        (cy + 3, "Press Q or ESC to quit", Color::White),
    ];

    for (row, msg, color) in lines {
        let col = centered_col(state.playfield.width, msg);
        canvas.text(col, row.max(0) as u16, msg, color)?;
    }

    canvas.present()
}

fn centered_col(width: u16, msg: &str) -> u16 {
    width.saturating_sub(msg.chars().count() as u16) / 2
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<C: Canvas>(canvas: &mut C, state: &GameState) -> std::io::Result<()> {
    let w = state.playfield.width;
    let h = state.playfield.height;
    let inner = w.saturating_sub(2);

    canvas.put(0, 0, '┌', C_BORDER)?;
    canvas.hline(1, 0, inner, '─', C_BORDER)?;
    canvas.put(w - 1, 0, '┐', C_BORDER)?;

    for row in 1..h - 1 {
        canvas.put(0, row, '│', C_BORDER)?;
        canvas.put(w - 1, row, '│', C_BORDER)?;
    }

    canvas.put(0, h - 1, '└', C_BORDER)?;
    canvas.hline(1, h - 1, inner, '─', C_BORDER)?;
    canvas.put(w - 1, h - 1, '┘', C_BORDER)?;
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<C: Canvas>(canvas: &mut C, state: &GameState, term_rows: u16) -> std::io::Result<()> {
    canvas.text(2, 0, "GALAGA", C_TITLE)?;
    canvas.text(2, 1, &format!(" Score: {} ", state.player.score), C_HUD_SCORE)?;
    canvas.text(2, 2, &format!(" Health: {} ", state.player.health), C_HUD_HEALTH)?;
    canvas.text(2, 3, &format!(" Wave: {} ", state.wave.wave), C_HUD_WAVE)?;

    if term_rows > state.playfield.height {
        canvas.text(2, state.playfield.height, CONTROLS_HINT, C_HINT)?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Rows that may hold sprites: strictly inside the top border and the
/// playfield's last row.
fn visible_row(state: &GameState, y: i32) -> bool {
    y > 0 && y < state.playfield.height as i32
}

fn draw_player<C: Canvas>(canvas: &mut C, state: &GameState) -> std::io::Result<()> {
    let p = &state.player;
    canvas.put(p.x as u16, p.y as u16, PLAYER_GLYPH, C_PLAYER)
}

fn draw_enemies<C: Canvas>(canvas: &mut C, state: &GameState) -> std::io::Result<()> {
    for (_, enemy) in state.enemies.iter_active() {
        if !visible_row(state, enemy.y) {
            continue;
        }
        canvas.hline(enemy.x as u16, enemy.y as u16, ENEMY_LEN as u16, ENEMY_GLYPH, C_ENEMY)?;
    }
    Ok(())
}

fn draw_bullets<C: Canvas>(canvas: &mut C, state: &GameState) -> std::io::Result<()> {
    for (_, bullet) in state.bullets.iter_active() {
        if !visible_row(state, bullet.y) {
            continue;
        }
        canvas.put(bullet.x as u16, bullet.y as u16, BULLET_GLYPH, C_BULLET)?;
    }
    Ok(())
}

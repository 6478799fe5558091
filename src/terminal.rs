//! Terminal plumbing for the binary: raw mode, the size precondition and
//! crossterm-backed key reading.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event},
    terminal, ExecutableCommand,
};
use log::info;

use wave_shooter::entities::Playfield;
use wave_shooter::error::{GameError, GameResult};
use wave_shooter::input::{key_from_event, Key, KeySource};

/// Fail unless the terminal can show the whole playfield.
pub fn check_size(playfield: &Playfield) -> GameResult<()> {
    let (cols, rows) = terminal::size()?;
    if cols < playfield.width || rows < playfield.height {
        return Err(GameError::TerminalTooSmall {
            needed_w: playfield.width,
            needed_h: playfield.height,
            actual_w: cols,
            actual_h: rows,
        });
    }
    Ok(())
}

/// Current terminal height in rows.
pub fn rows() -> io::Result<u16> {
    terminal::size().map(|(_, rows)| rows)
}

pub fn enter<W: Write>(out: &mut W) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    info!("Terminal switched to raw mode");
    Ok(())
}

/// Best effort: every step runs even if an earlier one failed.
pub fn restore<W: Write>(out: &mut W) {
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    info!("Terminal restored");
}

/// Non-blocking key source over crossterm's event queue.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<Key>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(ev) = event::read()? {
                if let Some(key) = key_from_event(ev) {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// Block until a key is pressed.
pub fn wait_key() -> io::Result<Key> {
    loop {
        if let Event::Key(ev) = event::read()? {
            if let Some(key) = key_from_event(ev) {
                return Ok(key);
            }
        }
    }
}

//! Keyboard input: key normalisation, key sources and the intent latch.
//!
//! Terminals report OS key-repeat as a train of discrete presses with no
//! release event. The latch turns that into continuous intent by extending a
//! deadline on every press; the intent lapses once no press has arrived for
//! the grace window.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::constants::{MAX_INPUTS_PER_FRAME, MOVE_HOLD_GRACE_S, SHOOT_HOLD_GRACE_S};

/// Normalised key code. Letters are lower-cased.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Esc,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Esc => Key::Esc,
            _ => Key::Other,
        }
    }
}

/// Translate a terminal key event. Releases are dropped and Ctrl+C acts as
/// `q`, since raw mode swallows SIGINT.
pub fn key_from_event(ev: KeyEvent) -> Option<Key> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c') {
        return Some(Key::Char('q'));
    }
    Some(Key::from(ev.code))
}

/// Non-blocking "next queued key or none".
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Option<Key>>;
}

/// Pre-recorded key queue, handy for tests and demos.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    queue: VecDeque<Key>,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        ScriptedKeys { queue: keys.into_iter().collect() }
    }

    pub fn push(&mut self, key: Key) {
        self.queue.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Option<Key>> {
        Ok(self.queue.pop_front())
    }
}

// ── Latch ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct InputLatch {
    /// -1, 0 or +1.
    pub move_dir: i32,
    pub move_held_until: f64,
    /// One-shot; consumed by the player update of the same frame.
    pub fire_pressed: bool,
    pub fire_held_until: f64,
    pub quit_requested: bool,
}

impl Default for InputLatch {
    /// Deadlines start in the infinite past so an idle latch never reports
    /// intent, whatever the clock origin.
    fn default() -> Self {
        InputLatch {
            move_dir: 0,
            move_held_until: f64::NEG_INFINITY,
            fire_pressed: false,
            fire_held_until: f64::NEG_INFINITY,
            quit_requested: false,
        }
    }
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn handle_key(&mut self, key: Key, now: f64) {
        match key {
            Key::Char('a') | Key::Left => {
                self.move_dir = -1;
                self.move_held_until = now + MOVE_HOLD_GRACE_S;
            }
            Key::Char('d') | Key::Right => {
                self.move_dir = 1;
                self.move_held_until = now + MOVE_HOLD_GRACE_S;
            }
            Key::Char(' ') => {
                self.fire_pressed = true;
                self.fire_held_until = now + SHOOT_HOLD_GRACE_S;
            }
            Key::Char('q') => self.quit_requested = true,
            _ => {}
        }
    }

    /// Feed at most `MAX_INPUTS_PER_FRAME` queued keys into the latch so a
    /// backlog cannot starve the update and render steps. Returns how many
    /// keys were read.
    pub fn drain<S: KeySource + ?Sized>(&mut self, source: &mut S, now: f64) -> io::Result<usize> {
        let mut read = 0;
        while read < MAX_INPUTS_PER_FRAME {
            match source.next_key()? {
                Some(key) => {
                    self.handle_key(key, now);
                    read += 1;
                }
                None => break,
            }
        }
        Ok(read)
    }

    pub fn is_moving(&self, now: f64) -> bool {
        self.move_dir != 0 && now <= self.move_held_until
    }

    pub fn is_firing(&self, now: f64) -> bool {
        self.fire_pressed || now <= self.fire_held_until
    }

    /// Clear the one-shot fire flag.
    pub fn consume_fire_press(&mut self) {
        self.fire_pressed = false;
    }
}

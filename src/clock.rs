//! Time sources and per-frame delta computation.

use std::cell::Cell;
use std::time::Instant;

use crate::constants::MAX_DT_S;

/// Monotonic time in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Seconds elapsed since the clock was created.
///
/// There is no coarse fallback: std panics if the OS monotonic clock cannot
/// be read. Backwards or oversized steps are absorbed by [`FrameTimer`].
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and scripted replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    t: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        ManualClock { t: Cell::new(start) }
    }

    pub fn set(&self, t: f64) {
        self.t.set(t);
    }

    pub fn advance(&self, dt: f64) {
        self.t.set(self.t.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.t.get()
    }
}

/// Turns successive timestamps into a clamped frame delta.
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    prev: f64,
}

impl FrameTimer {
    pub fn new(now: f64) -> Self {
        FrameTimer { prev: now }
    }

    /// Delta since the previous call, clamped to `[0, MAX_DT_S]` so a stall
    /// or a clock going backwards never produces a destabilising step.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = (now - self.prev) as f32;
        self.prev = now;
        dt.clamp(0.0, MAX_DT_S)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_timer_clamps_stalls() {
        let mut timer = FrameTimer::new(0.0);
        assert!((timer.tick(0.016) - 0.016).abs() < 1e-6);
        assert_eq!(timer.tick(2.0), MAX_DT_S);
    }

    #[test]
    fn frame_timer_never_goes_negative() {
        let mut timer = FrameTimer::new(5.0);
        assert_eq!(timer.tick(4.0), 0.0);
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let mut prev = clock.now();
        assert!(prev >= 0.0);
        for _ in 0..1000 {
            let t = clock.now();
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(1.0);
        clock.advance(0.5);
        assert_eq!(clock.now(), 1.5);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }
}

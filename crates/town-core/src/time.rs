//! Simulation time model.
//!
//! # Design
//!
//! Two clocks run side by side:
//!
//! - `Tick` counts frames.  Animation is keyed on it (`tick % speed == 0`)
//!   so sprite frames advance slower than positions.
//! - `Millis` is the monotonic millisecond timestamp every timer (task,
//!   exploration, regeneration, encounters, cooldowns) is measured against.
//!
//! `SimClock` maps one to the other for fixed-step runs:
//!
//!   now = start_ms + tick * tick_duration_ms
//!
//! Real-time front ends may instead pass wall-clock `Millis` straight into
//! the tick loop; nothing downstream assumes a fixed step.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// `true` on the ticks where animation frames advance.
    #[inline]
    pub fn is_animation_tick(self, animation_tick_speed: u64) -> bool {
        animation_tick_speed > 0 && self.0 % animation_tick_speed == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Millis ────────────────────────────────────────────────────────────────────

/// A monotonic timestamp in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Milliseconds elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` once at least `duration_ms` has passed since `start`.
    #[inline]
    pub fn has_elapsed(self, start: Millis, duration_ms: u64) -> bool {
        self.since(start) >= duration_ms
    }
}

impl std::ops::Add<u64> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: u64) -> Millis {
        Millis(self.0 + rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step clock: converts the frame counter into `Millis`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Timestamp of tick 0.
    pub start_ms: u64,
    /// How many milliseconds one tick represents.  Default: 16 (≈ 60 fps).
    pub tick_duration_ms: u64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_ms: u64, tick_duration_ms: u64) -> Self {
        Self {
            start_ms,
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Timestamp corresponding to `current_tick`.
    #[inline]
    pub fn now(&self) -> Millis {
        Millis(self.start_ms + self.current_tick.0 * self.tick_duration_ms)
    }

    /// How many ticks span `ms` milliseconds (rounds up).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1))
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now())
    }
}

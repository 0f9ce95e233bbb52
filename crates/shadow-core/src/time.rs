//! Controller time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per host
//! frame.  The mapping to seconds is held in `ControlClock`:
//!
//!   elapsed_secs = tick / tick_rate_hz
//!
//! Every second-valued setting (timeouts, cooldowns, durations) is converted
//! to a whole number of ticks once, rounding up, so all comparisons during a
//! run are exact integer comparisons and identical inputs replay identically.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute controller tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
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

// ── ClockConfig ───────────────────────────────────────────────────────────────

fn default_tick_rate() -> u32 {
    60
}

/// Clock settings as they appear in the configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Host frames per second.  Default: 60.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { tick_rate_hz: default_tick_rate() }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_rate_hz == 0 {
            return Err(CoreError::Config("clock.tick_rate_hz must be positive".into()));
        }
        Ok(())
    }

    /// Construct a `ControlClock` at tick 0.
    pub fn make_clock(&self) -> ControlClock {
        ControlClock::new(self.tick_rate_hz)
    }
}

// ── ControlClock ──────────────────────────────────────────────────────────────

/// Converts between tick counts and seconds.
///
/// `ControlClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
pub struct ControlClock {
    /// Ticks per second.  Never zero.
    pub tick_rate_hz: u32,
    /// The current tick — advanced by `ControlClock::advance()` each frame.
    pub current_tick: Tick,
}

impl ControlClock {
    /// Create a clock at tick 0.  A zero rate is clamped to 1 Hz.
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz: tick_rate_hz.max(1),
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Seconds represented by a single tick.
    #[inline]
    pub fn dt_secs(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }

    /// Elapsed seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 / self.tick_rate_hz as f64
    }

    /// How many ticks span `secs` seconds?  Rounds up so a timeout never
    /// fires early; negative and NaN inputs count as zero.
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        if secs.is_nan() || secs <= 0.0 {
            return 0;
        }
        // The small bias absorbs f32 representation error (0.1 s at 60 Hz is
        // 6.0000001 ticks, which must not round up to 7).
        (secs as f64 * self.tick_rate_hz as f64 - 1e-4).ceil().max(0.0) as u64
    }
}

impl fmt::Display for ControlClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

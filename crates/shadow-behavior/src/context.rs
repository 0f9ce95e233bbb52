//! Read-only inputs to the response decision.

use serde::{Deserialize, Serialize};

use shadow_core::{ControlClock, SeatIndex, Tick};
use shadow_seating::SeatRegistry;

use crate::{BehaviorError, BehaviorResult};

/// Where the shadow currently is.
///
/// Once placed, the shadow is always at exactly one seat or at the floor;
/// `Unplaced` exists only before the first sequence completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Unplaced,
    AtSeat(SeatIndex),
    AtFloor,
}

impl Placement {
    #[inline]
    pub fn seat(self) -> Option<SeatIndex> {
        match self {
            Placement::AtSeat(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn on_floor(self) -> bool {
        self == Placement::AtFloor
    }

    #[inline]
    pub fn is_placed(self) -> bool {
        self != Placement::Unplaced
    }
}

// ── Glare gating ──────────────────────────────────────────────────────────────

fn default_cooldown() -> f32 {
    3.0
}

fn default_threshold() -> f32 {
    0.5
}

/// Glare settings as they appear in the configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlareConfig {
    /// Minimum seconds between two glares.  Default: 3.0.
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: f32,
    /// Minimum snapshot confidence for a glare.  Default: 0.5.
    #[serde(default = "default_threshold")]
    pub confidence_threshold: f32,
}

impl Default for GlareConfig {
    fn default() -> Self {
        Self { cooldown_secs: default_cooldown(), confidence_threshold: default_threshold() }
    }
}

impl GlareConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        if !self.cooldown_secs.is_finite() || self.cooldown_secs < 0.0 {
            return Err(BehaviorError::Config("glare.cooldown_secs must be a non-negative number".into()));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(BehaviorError::Config("glare.confidence_threshold must be within [0, 1]".into()));
        }
        Ok(())
    }

    /// Convert to tick units for `clock`.
    pub fn to_gate(&self, clock: &ControlClock) -> GlareGate {
        GlareGate {
            cooldown_ticks:       clock.ticks_for_secs(self.cooldown_secs),
            confidence_threshold: self.confidence_threshold,
        }
    }
}

/// Glare gating in tick units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlareGate {
    pub cooldown_ticks:       u64,
    pub confidence_threshold: f32,
}

impl GlareGate {
    /// Both checks must pass: confidence at or above the threshold, and at
    /// least `cooldown_ticks` since the last glare.
    pub fn allows(&self, confidence: f32, now: Tick, last_glare: Option<Tick>) -> bool {
        confidence >= self.confidence_threshold
            && last_glare.is_none_or(|t| now.since(t) >= self.cooldown_ticks)
    }
}

// ── DecisionContext ───────────────────────────────────────────────────────────

/// Everything [`decide`][crate::decide] looks at.  Built fresh for each
/// admitted snapshot, after the registry has absorbed it.
pub struct DecisionContext<'a> {
    pub registry:   &'a SeatRegistry,
    pub placement:  Placement,
    /// The snapshot's active seat, resolved against the registry.  Unknown
    /// ids resolve to `None`.
    pub human_seat: Option<SeatIndex>,
    pub confidence: f32,
    pub now:        Tick,
    pub last_glare: Option<Tick>,
    pub glare:      GlareGate,
}

impl DecisionContext<'_> {
    #[inline]
    pub fn glare_allowed(&self) -> bool {
        self.glare.allows(self.confidence, self.now, self.last_glare)
    }
}

//! The controller configuration document.
//!
//! ```json
//! {
//!   "clock":        { "tick_rate_hz": 60 },
//!   "seats": [
//!     { "id": "left",  "position": [-1.2, 0.0, 2.0], "yaw_degrees": 180, "height_offset": 0.45 },
//!     { "id": "right", "position": [ 1.2, 0.0, 2.0], "yaw_degrees": 180, "look_target": [0.0, 1.2, -1.0] }
//!   ],
//!   "default_seat": "left",
//!   "floor":        { "position": [0.0, 0.0, 1.0], "yaw_degrees": 180 },
//!   "motion":       { "mode": "walk", "walk_speed": 1.2 },
//!   "glare":        { "cooldown_secs": 3.0, "confidence_threshold": 0.5 },
//!   "timing":       { "collision": { "stand_up": false } }
//! }
//! ```
//!
//! Everything except `seats` has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use shadow_behavior::{GlareConfig, TimingPolicy};
use shadow_core::ClockConfig;
use shadow_motion::MotionConfig;
use shadow_seating::{FloorSpec, SeatRegistry, SeatRegistryBuilder, SeatSpec, load_seats_csv};

use crate::{ControlError, ControlResult};

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ShadowConfig {
    #[serde(default)]
    pub clock: ClockConfig,

    /// Seats in index order.
    #[serde(default)]
    pub seats: Vec<SeatSpec>,

    /// Preferred seat id; the first seat when absent.
    #[serde(default)]
    pub default_seat: Option<String>,

    /// Where the shadow goes when every seat is taken.
    #[serde(default)]
    pub floor: Option<FloorSpec>,

    #[serde(default)]
    pub motion: MotionConfig,

    #[serde(default)]
    pub glare: GlareConfig,

    #[serde(default)]
    pub timing: TimingPolicy,
}

impl ShadowConfig {
    pub fn from_json_str(raw: &str) -> ControlResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> ControlResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Replace the seat list with the rows of a seat CSV.
    pub fn with_seats_csv(mut self, path: &Path) -> ControlResult<Self> {
        self.seats = load_seats_csv(path)?;
        Ok(self)
    }

    /// Check every construction-time rule, including that the seats form a
    /// valid registry.
    pub fn validate(&self) -> ControlResult<()> {
        self.clock.validate()?;
        self.motion.validate()?;
        self.glare.validate()?;
        self.timing.validate()?;
        self.build_registry().map(|_| ())
    }

    /// Build the seat registry described by this document.
    pub fn build_registry(&self) -> ControlResult<SeatRegistry> {
        if self.seats.is_empty() {
            return Err(ControlError::Config("at least one seat must be configured".into()));
        }
        let mut builder = SeatRegistryBuilder::new().seats(self.seats.iter().cloned());
        if let Some(id) = &self.default_seat {
            builder = builder.default_seat(id.clone());
        }
        if let Some(floor) = &self.floor {
            builder = builder.floor(floor.clone());
        }
        Ok(builder.build()?)
    }
}

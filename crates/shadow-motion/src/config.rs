//! Motion settings.

use serde::{Deserialize, Serialize};

use shadow_core::MotionMode;

use crate::{MotionError, MotionResult};

fn default_duration() -> f32 {
    1.0
}

fn default_walk_speed() -> f32 {
    1.2
}

fn default_rotation_speed() -> f32 {
    360.0
}

fn default_stopping_distance() -> f32 {
    0.05
}

fn default_min_walk_distance() -> f32 {
    0.3
}

/// Motion settings as they appear in the configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Relocation mode.  Default: `interpolate`.
    #[serde(default)]
    pub mode: MotionMode,

    /// Length of an eased interpolation, in seconds.  Default: 1.0.
    #[serde(default = "default_duration")]
    pub move_duration_secs: f32,

    /// Walk speed in metres per second.  Default: 1.2.
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,

    /// Maximum turn rate while walking, degrees per second.  Default: 360.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed_degrees: f32,

    /// A walk ends within this horizontal distance of the target.  Default: 0.05.
    #[serde(default = "default_stopping_distance")]
    pub stopping_distance: f32,

    /// Walks shorter than this are interpolated instead.  Default: 0.3.
    #[serde(default = "default_min_walk_distance")]
    pub min_walk_distance: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            mode:                   MotionMode::default(),
            move_duration_secs:     default_duration(),
            walk_speed:             default_walk_speed(),
            rotation_speed_degrees: default_rotation_speed(),
            stopping_distance:      default_stopping_distance(),
            min_walk_distance:      default_min_walk_distance(),
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> MotionResult<()> {
        let positive = [
            ("move_duration_secs", self.move_duration_secs),
            ("walk_speed", self.walk_speed),
            ("rotation_speed_degrees", self.rotation_speed_degrees),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(MotionError::Config(format!("motion.{name} must be positive, got {v}")));
            }
        }
        let non_negative = [
            ("stopping_distance", self.stopping_distance),
            ("min_walk_distance", self.min_walk_distance),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(MotionError::Config(format!("motion.{name} must not be negative, got {v}")));
            }
        }
        Ok(())
    }
}

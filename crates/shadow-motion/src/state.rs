//! The in-flight move.

use shadow_core::{MotionMode, Pose};

/// One move from `start` to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveState {
    pub start:  Pose,
    pub target: Pose,
    /// Mode actually used; a short walk is downgraded to interpolation.
    pub mode:   MotionMode,
    /// Seconds since the move began.
    pub elapsed_secs: f32,
    /// Interpolation length.  Unused by walks.
    pub duration_secs: f32,
}

impl MoveState {
    /// Interpolation progress in `[0.0, 1.0]`.  Returns `1.0` for a
    /// zero-length move.
    pub fn progress(&self) -> f32 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
    }
}

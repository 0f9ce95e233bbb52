//! How the controlled entity travels between anchors.

use serde::{Deserialize, Serialize};

/// Motion mode used for a relocation.
///
/// Stored per move step so a single behavior can mix modes (a glare turns in
/// place by interpolation even when relocations walk).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionMode {
    /// Eased position/orientation blend over a fixed duration.
    #[default]
    Interpolate,
    /// Constant-speed walk along the floor plane with a locomotion signal.
    Walk,
}

impl MotionMode {
    /// Human-readable label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            MotionMode::Interpolate => "interpolate",
            MotionMode::Walk        => "walk",
        }
    }
}

impl std::fmt::Display for MotionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

//! Seat and floor anchors.

use serde::{Deserialize, Serialize};

use shadow_core::{Pose, Quat, SeatIndex, Vec3};

// ── Configuration shapes ──────────────────────────────────────────────────────

/// One seat as written in configuration.
///
/// Orientation may be given either as a yaw in degrees or as a full
/// quaternion; the quaternion wins when both are present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeatSpec {
    pub id:            String,
    pub position:      Vec3,
    #[serde(default)]
    pub yaw_degrees:   Option<f32>,
    #[serde(default)]
    pub orientation:   Option<Quat>,
    #[serde(default)]
    pub look_target:   Option<Vec3>,
    #[serde(default)]
    pub height_offset: f32,
}

impl SeatSpec {
    /// Seat at `position` facing `yaw_degrees`, no look target or offset.
    pub fn new(id: impl Into<String>, position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            id:            id.into(),
            position,
            yaw_degrees:   Some(yaw_degrees),
            orientation:   None,
            look_target:   None,
            height_offset: 0.0,
        }
    }

    pub fn with_look_target(mut self, target: Vec3) -> Self {
        self.look_target = Some(target);
        self
    }

    pub fn with_height_offset(mut self, offset: f32) -> Self {
        self.height_offset = offset;
        self
    }

    pub(crate) fn resolved_orientation(&self) -> Quat {
        resolve_orientation(self.orientation, self.yaw_degrees)
    }
}

/// The floor anchor as written in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorSpec {
    pub position:    Vec3,
    #[serde(default)]
    pub yaw_degrees: Option<f32>,
    #[serde(default)]
    pub orientation: Option<Quat>,
    #[serde(default)]
    pub look_target: Option<Vec3>,
}

impl FloorSpec {
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self { position, yaw_degrees: Some(yaw_degrees), orientation: None, look_target: None }
    }
}

fn resolve_orientation(orientation: Option<Quat>, yaw_degrees: Option<f32>) -> Quat {
    orientation
        .map(Quat::normalized)
        .or_else(|| yaw_degrees.map(Quat::from_yaw_degrees))
        .unwrap_or(Quat::IDENTITY)
}

/// Orientation at `position`: face `look_target` horizontally if one is set
/// and usable, otherwise `fallback`.
fn facing(position: Vec3, look_target: Option<Vec3>, fallback: Quat) -> Quat {
    look_target
        .and_then(|t| Quat::look_horizontal(t - position))
        .unwrap_or(fallback)
}

// ── Seat ──────────────────────────────────────────────────────────────────────

/// A registered seat.
///
/// Occupancy flags are readable here but only writable through
/// [`SeatRegistry`][crate::SeatRegistry].
#[derive(Clone, Debug, PartialEq)]
pub struct Seat {
    pub(crate) id:                 String,
    pub(crate) index:              SeatIndex,
    pub(crate) anchor_position:    Vec3,
    pub(crate) anchor_orientation: Quat,
    pub(crate) look_target:        Option<Vec3>,
    pub(crate) height_offset:      f32,
    pub(crate) human_occupied:     bool,
    pub(crate) shadow_occupied:    bool,
}

impl Seat {
    pub(crate) fn from_spec(spec: &SeatSpec, index: SeatIndex) -> Self {
        Self {
            id:                 spec.id.clone(),
            index,
            anchor_position:    spec.position,
            anchor_orientation: spec.resolved_orientation(),
            look_target:        spec.look_target,
            height_offset:      spec.height_offset,
            human_occupied:     false,
            shadow_occupied:    false,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn index(&self) -> SeatIndex {
        self.index
    }

    #[inline]
    pub fn anchor_position(&self) -> Vec3 {
        self.anchor_position
    }

    #[inline]
    pub fn anchor_orientation(&self) -> Quat {
        self.anchor_orientation
    }

    #[inline]
    pub fn look_target(&self) -> Option<Vec3> {
        self.look_target
    }

    #[inline]
    pub fn height_offset(&self) -> f32 {
        self.height_offset
    }

    #[inline]
    pub fn human_occupied(&self) -> bool {
        self.human_occupied
    }

    #[inline]
    pub fn shadow_occupied(&self) -> bool {
        self.shadow_occupied
    }

    /// The exact pose the shadow takes when seated here.
    ///
    /// Position is the anchor raised by `height_offset`; orientation faces
    /// the look target when one is configured, else the anchor orientation.
    pub fn anchor_pose(&self) -> Pose {
        Pose::new(
            self.anchor_position + Vec3::UP * self.height_offset,
            facing(self.anchor_position, self.look_target, self.anchor_orientation),
        )
    }
}

// ── FloorAnchor ───────────────────────────────────────────────────────────────

/// Where the shadow sits when no seat is available.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorAnchor {
    position:    Vec3,
    orientation: Quat,
    look_target: Option<Vec3>,
}

impl FloorAnchor {
    pub fn from_spec(spec: &FloorSpec) -> Self {
        Self {
            position:    spec.position,
            orientation: resolve_orientation(spec.orientation, spec.yaw_degrees),
            look_target: spec.look_target,
        }
    }

    #[inline]
    pub fn look_target(&self) -> Option<Vec3> {
        self.look_target
    }

    /// The exact pose the shadow takes when sitting on the floor.
    pub fn anchor_pose(&self) -> Pose {
        Pose::new(self.position, facing(self.position, self.look_target, self.orientation))
    }
}

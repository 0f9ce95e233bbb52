//! Minimal pose math: positions, orientations, and easing.
//!
//! Conventions follow the host engine: Y is up, `+Z` is forward, and yaw is a
//! rotation about the up axis measured in degrees (`0°` faces `+Z`, `90°`
//! faces `+X`).  Everything is single precision; the controlled entity lives
//! in a room-sized space where `f32` is far more than enough.

use serde::{Deserialize, Serialize};

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A 3-component vector.  Serialized as `[x, y, z]`.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    /// The vector with its vertical component removed.
    #[inline]
    pub fn horizontal(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// Unit vector in the same direction, or `None` for (near-)zero input.
    pub fn normalized(self) -> Option<Vec3> {
        let len = self.length();
        if len <= f32::EPSILON {
            None
        } else {
            Some(self * (1.0 / len))
        }
    }

    /// Linear interpolation; `t` is not clamped.
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── Quat ──────────────────────────────────────────────────────────────────────

/// A unit quaternion orientation.  Serialized as `[x, y, z, w]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Rotation of `degrees` about the up axis.
    pub fn from_yaw_degrees(degrees: f32) -> Quat {
        let half = degrees.to_radians() * 0.5;
        Quat { x: 0.0, y: half.sin(), z: 0.0, w: half.cos() }
    }

    /// Yaw rotation that faces along the horizontal projection of `dir`.
    ///
    /// Returns `None` when `dir` has no horizontal extent (straight up/down
    /// or zero), since any heading would be equally valid.
    pub fn look_horizontal(dir: Vec3) -> Option<Quat> {
        let flat = dir.horizontal().normalized()?;
        Some(Quat::from_yaw_degrees(flat.x.atan2(flat.z).to_degrees()))
    }

    /// Heading of this orientation's forward vector, in degrees `(-180, 180]`.
    pub fn yaw_degrees(self) -> f32 {
        let f = self.rotate(Vec3::FORWARD);
        f.x.atan2(f.z).to_degrees()
    }

    #[inline]
    pub fn dot(self, other: Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Re-normalize, falling back to identity for degenerate input.
    pub fn normalized(self) -> Quat {
        let len = self.dot(self).sqrt();
        if len <= f32::EPSILON {
            return Quat::IDENTITY;
        }
        let inv = 1.0 / len;
        Quat { x: self.x * inv, y: self.y * inv, z: self.z * inv, w: self.w * inv }
    }

    /// Rotate a vector by this orientation.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Smallest angle between two orientations, in degrees `[0, 180]`.
    pub fn angle_to(self, other: Quat) -> f32 {
        let d = self.dot(other).abs().min(1.0);
        (2.0 * d.acos()).to_degrees()
    }

    /// Spherical interpolation along the shortest arc; `t` is clamped to `[0, 1]`.
    pub fn slerp(self, other: Quat, t: f32) -> Quat {
        let t = t.clamp(0.0, 1.0);
        let mut end = other;
        let mut cos = self.dot(other);
        if cos < 0.0 {
            end = Quat { x: -other.x, y: -other.y, z: -other.z, w: -other.w };
            cos = -cos;
        }

        // Nearly parallel: normalized lerp avoids dividing by sin(≈0).
        let (a, b) = if cos > 0.9995 {
            (1.0 - t, t)
        } else {
            let theta = cos.acos();
            let sin = theta.sin();
            (((1.0 - t) * theta).sin() / sin, (t * theta).sin() / sin)
        };

        Quat {
            x: self.x * a + end.x * b,
            y: self.y * a + end.y * b,
            z: self.z * a + end.z * b,
            w: self.w * a + end.w * b,
        }
        .normalized()
    }

    /// Rotate from `self` toward `target` by at most `max_degrees`.
    pub fn rotate_towards(self, target: Quat, max_degrees: f32) -> Quat {
        let angle = self.angle_to(target);
        if angle <= f32::EPSILON || max_degrees >= angle {
            return target;
        }
        self.slerp(target, max_degrees / angle)
    }
}

impl From<[f32; 4]> for Quat {
    fn from(v: [f32; 4]) -> Self {
        Quat { x: v[0], y: v[1], z: v[2], w: v[3] }.normalized()
    }
}

impl From<Quat> for [f32; 4] {
    fn from(q: Quat) -> Self {
        [q.x, q.y, q.z, q.w]
    }
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// Position plus orientation of the controlled entity or an anchor.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position:    Vec3,
    pub orientation: Quat,
}

impl Pose {
    #[inline]
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// Pose at `position` facing `yaw_degrees`.
    pub fn from_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self::new(position, Quat::from_yaw_degrees(yaw_degrees))
    }

    /// Same position, new orientation.
    #[inline]
    pub fn with_orientation(self, orientation: Quat) -> Self {
        Self { orientation, ..self }
    }

    /// Interpolate position linearly and orientation spherically at `t`.
    pub fn interpolate(self, target: Pose, t: f32) -> Pose {
        Pose {
            position:    self.position.lerp(target.position, t),
            orientation: self.orientation.slerp(target.orientation, t),
        }
    }

    /// `true` when both position and heading agree within the tolerances.
    pub fn approx_eq(self, other: Pose, position_eps: f32, angle_eps_degrees: f32) -> bool {
        self.position.distance(other.position) <= position_eps
            && self.orientation.angle_to(other.orientation) <= angle_eps_degrees
    }
}

/// Cubic ease-in/ease-out of `t ∈ [0, 1]` (clamped).
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

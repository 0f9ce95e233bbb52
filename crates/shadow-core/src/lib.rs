//! `shadow-core` — foundational types for the shadow seat controller.
//!
//! This crate is a dependency of every other `shadow-*` crate.  It has no
//! `shadow-*` dependencies and minimal external ones (`thiserror`, `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `SeatIndex`, `SequenceHandle`                         |
//! | [`pose`]        | `Vec3`, `Quat`, `Pose`, easing                        |
//! | [`time`]        | `Tick`, `ControlClock`, `ClockConfig`                 |
//! | [`motion_mode`] | `MotionMode` enum                                     |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod error;
pub mod ids;
pub mod motion_mode;
pub mod pose;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{SeatIndex, SequenceHandle};
pub use motion_mode::MotionMode;
pub use pose::{Pose, Quat, Vec3, smoothstep};
pub use time::{ClockConfig, ControlClock, Tick};

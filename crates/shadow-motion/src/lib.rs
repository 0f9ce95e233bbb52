//! `shadow-motion` — moving the shadow between anchors.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`config`]     | `MotionConfig` — mode, duration, walk tunables            |
//! | [`state`]      | `MoveState` — the in-flight move                          |
//! | [`controller`] | `MovementController`, `MotionStatus`                      |
//! | [`error`]      | `MotionError`, `MotionResult<T>`                          |
//!
//! # Movement model
//!
//! The controller is stepped once per tick with the tick length in seconds
//! and writes the new pose in place:
//!
//! 1. `begin(from, target, mode)` records the move; a walk shorter than
//!    `min_walk_distance` is downgraded to interpolation.
//! 2. `step(&mut pose, dt)` reports `Moving`/`Walking` until the pose
//!    equals the target exactly, then `Arrived` once.
//! 3. `cancel()` stops wherever the pose currently is.
//!
//! The controller knows nothing about animation; the sequencer turns
//! `Walking { speed }` into `LocomotionSpeed` writes.

pub mod config;
pub mod controller;
pub mod error;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::MotionConfig;
pub use controller::{MotionStatus, MovementController};
pub use error::{MotionError, MotionResult};
pub use state::MoveState;

//! `shadow-behavior` — what the shadow does about an occupancy change.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                         |
//! |---------------|------------------------------------------------------------------|
//! | [`event`]     | `Reaction`, `AnimationEvent` — the trigger/parameter protocol     |
//! | [`animator`]  | `Animator`, `ModeGate` traits; `AnimState`, `StateSample`        |
//! | [`step`]      | `BehaviorStep`, `BehaviorSequence`, `Destination`                |
//! | [`context`]   | `DecisionContext`, `Placement`, `GlareConfig`, `GlareGate`       |
//! | [`decision`]  | `Response`, `decide` — the priority-ordered decision             |
//! | [`policy`]    | `ReactionTiming`, `TimingPolicy`, `SequencePlanner`              |
//! | [`simulated`] | `SimulatedAnimator`, `NullAnimator`                              |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! Deciding and planning are separate, pure phases:
//!
//! 1. **Decide**: `decide(&DecisionContext)` reads the registry (already
//!    updated from the snapshot) and the current placement and returns a
//!    `Response`.  No mutation.
//!
//! 2. **Plan**: `SequencePlanner::plan` expands the `Response` into a
//!    `BehaviorSequence` using the per-reaction timing policy.
//!
//! Executing the sequence (polling the animator, moving, finalizing the
//! placement) is shadow-control's job.

pub mod animator;
pub mod context;
pub mod decision;
pub mod error;
pub mod event;
pub mod policy;
pub mod simulated;
pub mod step;


pub use animator::{AnimState, Animator, ModeGate, StateSample};
pub use context::{DecisionContext, GlareConfig, GlareGate, Placement};
pub use decision::{Response, decide};
pub use error::{BehaviorError, BehaviorResult};
pub use event::{AnimationEvent, Reaction};
pub use policy::{ReactionTiming, SequencePlanner, TimingPolicy, anchor_pose};
pub use simulated::{NullAnimator, SimulatedAnimator};
pub use step::{BehaviorSequence, BehaviorStep, Destination};

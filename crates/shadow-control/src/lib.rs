//! `shadow-control` — tick loop orchestrator for the shadow seat controller.
//!
//! # Tick loop
//!
//! ```text
//! every tick:
//!   ① Snapshots — drain the SnapshotSource; each frame is parsed (rejects
//!                 leave state untouched), run through the ChangeDetector,
//!                 applied to the registry, and decided on.
//!   ② Start     — the decided Response is planned into a BehaviorSequence;
//!                 a new sequence supersedes the running one.
//!   ③ Poll      — the running sequence advances through every step that can
//!                 finish this tick; a completed relocation snaps the pose to
//!                 the destination anchor and updates the placement.
//!   ④ Animate   — Animator::on_tick(dt), then the clock advances.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `ShadowConfig` — the JSON configuration document           |
//! | [`builder`]   | `ControllerBuilder`                                        |
//! | [`controller`]| `ShadowController`, `ControllerState`                      |
//! | [`sequencer`] | `BehaviorSequencer` — step execution across ticks          |
//! | [`source`]    | `SnapshotSource` and the scripted/manual/channel sources   |
//! | [`observer`]  | `ControllerObserver`, `NoopObserver`                       |
//! | [`error`]     | `ControlError`, `ControlResult<T>`                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shadow_behavior::SimulatedAnimator;
//! use shadow_control::{ControllerBuilder, NoopObserver, ScriptedSource, ShadowConfig};
//!
//! let config = ShadowConfig::from_json_str(raw)?;
//! let mut controller = ControllerBuilder::new(config, SimulatedAnimator::new()).build()?;
//! let mut source = ScriptedSource::new().raw_at(Tick(0), r#"{"occupancy":{"left":true}}"#);
//! controller.run_ticks(600, &mut source, &mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod sequencer;
pub mod source;


pub use builder::ControllerBuilder;
pub use config::ShadowConfig;
pub use controller::{ControllerState, ShadowController};
pub use error::{ControlError, ControlResult};
pub use observer::{ControllerObserver, NoopObserver};
pub use sequencer::{
    BehaviorSequencer, COMPLETION_PROGRESS, CompletedSequence, SequenceOutcome, SequencePoll,
    SequencerContext,
};
pub use source::{ChannelSource, ManualOccupancy, NoSource, ScriptedSource, SnapshotSource};

//! The animation-event protocol.
//!
//! Everything the controller tells the animation subsystem is an
//! [`AnimationEvent`]: either a one-shot [`Reaction`] trigger or a write to
//! one of three continuous parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named one-shot animation trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    /// Visitor sat on the shadow's seat.
    Collision,
    /// Visitor sat right next to the shadow.
    Adjacent,
    /// Visitor sat further away; the shadow glares.
    Glare,
    /// Every seat is taken.
    AllFull,
    /// Get up before relocating.
    StandUp,
    /// Sit down on arrival at a seat (walk mode).
    Sit,
    /// Sit down on arrival at the floor (walk mode).
    SitOnFloor,
}

impl Reaction {
    pub const ALL: [Reaction; 7] = [
        Reaction::Collision,
        Reaction::Adjacent,
        Reaction::Glare,
        Reaction::AllFull,
        Reaction::StandUp,
        Reaction::Sit,
        Reaction::SitOnFloor,
    ];

    /// Trigger name as configured in the animation controller.
    pub fn trigger_name(self) -> &'static str {
        match self {
            Reaction::Collision  => "Collision-reaction",
            Reaction::Adjacent   => "Adjacent-reaction",
            Reaction::Glare      => "Glare",
            Reaction::AllFull    => "AllFull-reaction",
            Reaction::StandUp    => "StandUp",
            Reaction::Sit        => "Sit",
            Reaction::SitOnFloor => "SitOnFloor",
        }
    }

    /// Inverse of [`trigger_name`][Self::trigger_name].
    pub fn from_trigger_name(name: &str) -> Option<Reaction> {
        Reaction::ALL.into_iter().find(|r| r.trigger_name() == name)
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trigger_name())
    }
}

/// One message to the animation subsystem.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnimationEvent {
    /// Fire a one-shot trigger.
    Trigger(Reaction),
    /// `SeatIndex` integer parameter.
    SeatIndex(i32),
    /// `OnFloor` boolean parameter.
    OnFloor(bool),
    /// `LocomotionSpeed` float parameter, in metres per second.
    LocomotionSpeed(f32),
}

impl AnimationEvent {
    /// Trigger or parameter name.
    pub fn name(&self) -> &'static str {
        match self {
            AnimationEvent::Trigger(r)         => r.trigger_name(),
            AnimationEvent::SeatIndex(_)       => "SeatIndex",
            AnimationEvent::OnFloor(_)         => "OnFloor",
            AnimationEvent::LocomotionSpeed(_) => "LocomotionSpeed",
        }
    }

    /// The reaction if this is a trigger.
    pub fn reaction(&self) -> Option<Reaction> {
        match self {
            AnimationEvent::Trigger(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for AnimationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationEvent::Trigger(r)         => write!(f, "trigger {r}"),
            AnimationEvent::SeatIndex(i)       => write!(f, "SeatIndex = {i}"),
            AnimationEvent::OnFloor(b)         => write!(f, "OnFloor = {b}"),
            AnimationEvent::LocomotionSpeed(s) => write!(f, "LocomotionSpeed = {s:.2}"),
        }
    }
}

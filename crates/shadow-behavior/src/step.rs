//! Behavior steps and sequences.

use shadow_core::{MotionMode, Pose, SeatIndex};

use crate::{AnimationEvent, Reaction};

/// Where a sequence leaves the shadow when it completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Seat(SeatIndex),
    Floor,
}

/// One step of a behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum BehaviorStep {
    /// Fire an event at the animator (suppressed while the mode gate is
    /// asserted).  Never waits.
    Emit(AnimationEvent),

    /// Wait until the reaction's state has played to completion or been left,
    /// or `timeout_ticks` have passed.
    WaitForAnimationState { reaction: Reaction, timeout_ticks: u64 },

    /// Wait until the animator reports idle, or `timeout_ticks` have passed.
    WaitForIdle { timeout_ticks: u64 },

    /// Hand off to the movement controller and wait for arrival.  `settle`
    /// is fired on arrival (the walk-mode sit triggers).
    MoveTo { target: Pose, mode: MotionMode, settle: Option<Reaction> },
}

impl BehaviorStep {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BehaviorStep::Emit(_)                          => "emit",
            BehaviorStep::WaitForAnimationState { .. }     => "wait_state",
            BehaviorStep::WaitForIdle { .. }               => "wait_idle",
            BehaviorStep::MoveTo { .. }                    => "move_to",
        }
    }
}

/// An ordered step list plus the anchor to finalize into on completion.
///
/// `destination == None` leaves placement untouched (glare-only behaviors).
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorSequence {
    pub label:       &'static str,
    pub steps:       Vec<BehaviorStep>,
    pub destination: Option<Destination>,
}

impl BehaviorSequence {
    pub fn new(label: &'static str, destination: Option<Destination>) -> Self {
        Self { label, steps: Vec::new(), destination }
    }

    pub fn step(mut self, step: BehaviorStep) -> Self {
        self.steps.push(step);
        self
    }

    /// `true` if completing this sequence changes where the shadow is.
    pub fn relocates(&self) -> bool {
        self.destination.is_some()
    }

    /// Every reaction this sequence triggers directly.
    pub fn triggers(&self) -> impl Iterator<Item = Reaction> + '_ {
        self.steps.iter().filter_map(|s| match s {
            BehaviorStep::Emit(e) => e.reaction(),
            _ => None,
        })
    }
}

//! Seams to the external animation subsystem.
//!
//! The controller never owns animation playback.  It fires
//! [`AnimationEvent`]s at an [`Animator`] and polls its named state once per
//! tick; a [`ModeGate`] can silence the whole side-channel.

use crate::{AnimationEvent, Reaction};

/// Named state of the animation subsystem.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AnimState {
    /// Neutral pose (seated or standing idle).
    #[default]
    Idle,
    /// Playing the clip for a reaction trigger.
    Playing(Reaction),
    /// Walk blend driven by `LocomotionSpeed`.
    Locomotion,
}

impl AnimState {
    #[inline]
    pub fn is_idle(self) -> bool {
        self == AnimState::Idle
    }
}

/// The animator's state at the moment it was queried.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct StateSample {
    pub state:    AnimState,
    /// Normalized playback position in the current state, `0.0..=1.0`.
    pub progress: f32,
}

impl StateSample {
    pub fn new(state: AnimState, progress: f32) -> Self {
        Self { state, progress }
    }
}

/// The external animation subsystem.
///
/// Emission is fire-and-forget; the controller only learns what happened by
/// sampling [`current_state`][Self::current_state] on later ticks.
pub trait Animator {
    /// Deliver one trigger or parameter write.
    fn fire(&mut self, event: &AnimationEvent);

    /// Current named state and its playback progress.
    fn current_state(&self) -> StateSample;

    /// Called once per controller tick after the sequencer has run.  Real
    /// engines advance on their own and can ignore this.
    fn on_tick(&mut self, _dt_secs: f32) {}
}

impl<A: Animator + ?Sized> Animator for Box<A> {
    fn fire(&mut self, event: &AnimationEvent) {
        (**self).fire(event)
    }

    fn current_state(&self) -> StateSample {
        (**self).current_state()
    }

    fn on_tick(&mut self, dt_secs: f32) {
        (**self).on_tick(dt_secs)
    }
}

/// Suppresses all animation output while asserted.
///
/// Asserted means another subsystem is driving the pose directly; motion
/// still happens but no events or parameter writes reach the animator.
pub trait ModeGate {
    fn is_asserted(&self) -> bool;
}

impl ModeGate for bool {
    #[inline]
    fn is_asserted(&self) -> bool {
        *self
    }
}

impl<F: Fn() -> bool> ModeGate for F {
    #[inline]
    fn is_asserted(&self) -> bool {
        self()
    }
}

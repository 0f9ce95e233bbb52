//! Stand-in animators for tests and rehearsal runs.

use std::collections::{HashMap, HashSet};

use crate::{AnimState, AnimationEvent, Animator, Reaction, StateSample};

const DEFAULT_CLIP_SECS: f32 = 1.0;

/// Deterministic animator.
///
/// A trigger enters `Playing(reaction)` immediately with progress 0; each
/// [`on_tick`][Animator::on_tick] advances progress by `dt / clip_secs`,
/// and the clip returns to `Idle` once it reaches 1.  A positive
/// `LocomotionSpeed` enters `Locomotion`, zero leaves it.  Every received
/// event is recorded.
#[derive(Clone, Debug)]
pub struct SimulatedAnimator {
    state:    AnimState,
    progress: f32,
    clips:    HashMap<Reaction, f32>,
    ignored:  HashSet<Reaction>,
    events:   Vec<AnimationEvent>,
}

impl Default for SimulatedAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedAnimator {
    pub fn new() -> Self {
        Self {
            state:    AnimState::Idle,
            progress: 0.0,
            clips:    HashMap::new(),
            ignored:  HashSet::new(),
            events:   Vec::new(),
        }
    }

    /// Clip length for `reaction`.  Default: 1 s.
    pub fn with_clip(mut self, reaction: Reaction, secs: f32) -> Self {
        self.clips.insert(reaction, secs);
        self
    }

    /// Same clip length for every reaction.
    pub fn with_all_clips(mut self, secs: f32) -> Self {
        for r in Reaction::ALL {
            self.clips.insert(r, secs);
        }
        self
    }

    /// Behave as if the controller had no transition for `reaction`: the
    /// trigger is recorded but the state never changes.
    pub fn without_transition(mut self, reaction: Reaction) -> Self {
        self.ignored.insert(reaction);
        self
    }

    /// Every event received, in order.
    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }

    /// Just the triggers, in order.
    pub fn triggers(&self) -> Vec<Reaction> {
        self.events.iter().filter_map(AnimationEvent::reaction).collect()
    }

    /// How many times `reaction` was triggered.
    pub fn trigger_count(&self, reaction: Reaction) -> usize {
        self.events.iter().filter(|e| e.reaction() == Some(reaction)).count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn clip_secs(&self, reaction: Reaction) -> f32 {
        self.clips.get(&reaction).copied().unwrap_or(DEFAULT_CLIP_SECS)
    }
}

impl Animator for SimulatedAnimator {
    fn fire(&mut self, event: &AnimationEvent) {
        self.events.push(*event);
        match *event {
            AnimationEvent::Trigger(r) if !self.ignored.contains(&r) => {
                self.state = AnimState::Playing(r);
                self.progress = 0.0;
            }
            AnimationEvent::LocomotionSpeed(speed) => {
                if speed > 0.0 {
                    if !matches!(self.state, AnimState::Playing(_)) {
                        self.state = AnimState::Locomotion;
                    }
                } else if self.state == AnimState::Locomotion {
                    self.state = AnimState::Idle;
                }
                self.progress = 0.0;
            }
            _ => {}
        }
    }

    fn current_state(&self) -> StateSample {
        StateSample::new(self.state, self.progress)
    }

    fn on_tick(&mut self, dt_secs: f32) {
        if let AnimState::Playing(r) = self.state {
            let clip = self.clip_secs(r);
            self.progress = if clip <= 0.0 { 1.0 } else { self.progress + dt_secs / clip };
            if self.progress >= 1.0 {
                self.state = AnimState::Idle;
                self.progress = 0.0;
            }
        }
    }
}

/// Animator that ignores everything and is always idle.
///
/// Waits on a reaction state never see it entered, so they run to their
/// timeout; idle waits resolve at once.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullAnimator;

impl Animator for NullAnimator {
    fn fire(&mut self, _event: &AnimationEvent) {}

    fn current_state(&self) -> StateSample {
        StateSample::default()
    }
}

//! Per-reaction timing policy and the planner that turns a [`Response`] into
//! a [`BehaviorSequence`].
//!
//! Animation controllers differ in whether a reaction clip plays out fully
//! before the next transition is allowed, and some lack a stand-up clip
//! entirely.  Which waits a behavior performs is therefore configuration,
//! not code: each reaction carries a [`ReactionTiming`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use shadow_core::{ControlClock, MotionMode, Pose, Quat, SeatIndex};
use shadow_seating::SeatRegistry;

use crate::{
    AnimationEvent, BehaviorError, BehaviorResult, BehaviorSequence, BehaviorStep, Destination,
    Reaction, Response,
};

// ── ReactionTiming ────────────────────────────────────────────────────────────

fn default_timeout() -> f32 {
    3.0
}

fn yes() -> bool {
    true
}

/// Which waits one behavior performs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionTiming {
    /// Wait for the reaction clip to play out (or be left).
    #[serde(default = "yes")]
    pub await_reaction: bool,
    /// Then wait for the animator to return to idle.
    #[serde(default = "yes")]
    pub await_idle: bool,
    /// Fire `StandUp` and wait for it before moving.
    #[serde(default = "yes")]
    pub stand_up: bool,
    /// Upper bound on each individual wait, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: f32,
}

impl Default for ReactionTiming {
    fn default() -> Self {
        Self { await_reaction: true, await_idle: true, stand_up: true, timeout_secs: default_timeout() }
    }
}

impl ReactionTiming {
    /// Glare turns in place: no waits, no stand-up.
    pub fn glare() -> Self {
        Self { await_reaction: false, await_idle: false, stand_up: false, ..Self::default() }
    }

    /// Returning from the floor has no reaction clip to wait for.
    pub fn return_to_seat() -> Self {
        Self { await_reaction: false, ..Self::default() }
    }

    fn validate(&self, name: &str) -> BehaviorResult<()> {
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(BehaviorError::Config(format!(
                "timing.{name}.timeout_secs must be positive, got {}",
                self.timeout_secs
            )));
        }
        Ok(())
    }
}

/// Timing for every behavior that plays animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingPolicy {
    #[serde(default)]
    pub collision: ReactionTiming,
    #[serde(default)]
    pub adjacent: ReactionTiming,
    #[serde(default)]
    pub all_full: ReactionTiming,
    #[serde(default = "ReactionTiming::glare")]
    pub glare: ReactionTiming,
    #[serde(default = "ReactionTiming::return_to_seat")]
    pub return_to_seat: ReactionTiming,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            collision:      ReactionTiming::default(),
            adjacent:       ReactionTiming::default(),
            all_full:       ReactionTiming::default(),
            glare:          ReactionTiming::glare(),
            return_to_seat: ReactionTiming::return_to_seat(),
        }
    }
}

impl TimingPolicy {
    pub fn validate(&self) -> BehaviorResult<()> {
        self.collision.validate("collision")?;
        self.adjacent.validate("adjacent")?;
        self.all_full.validate("all_full")?;
        self.glare.validate("glare")?;
        self.return_to_seat.validate("return_to_seat")
    }

    /// Timing for `response`.  `None` for responses without animation.
    pub fn for_response(&self, response: Response) -> Option<&ReactionTiming> {
        match response {
            Response::Collision { .. }    => Some(&self.collision),
            Response::Adjacent { .. }     => Some(&self.adjacent),
            Response::AllFull             => Some(&self.all_full),
            Response::Glare { .. }        => Some(&self.glare),
            Response::ReturnToSeat { .. } => Some(&self.return_to_seat),
            Response::Stay | Response::ClaimDefault { .. } => None,
        }
    }
}

// ── SequencePlanner ───────────────────────────────────────────────────────────

/// Expands responses into step lists.
#[derive(Clone, Debug)]
pub struct SequencePlanner {
    timing: TimingPolicy,
    mode:   MotionMode,
    clock:  ControlClock,
}

impl SequencePlanner {
    /// `mode` is the relocation mode; glares always turn by interpolation.
    pub fn new(timing: TimingPolicy, mode: MotionMode, clock: &ControlClock) -> Self {
        Self { timing, mode, clock: ControlClock::new(clock.tick_rate_hz) }
    }

    pub fn timing(&self) -> &TimingPolicy {
        &self.timing
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Build the sequence for `response`, starting from the shadow's
    /// `current` pose.  `None` for [`Response::Stay`].
    pub fn plan(&self, response: Response, registry: &SeatRegistry, current: Pose) -> Option<BehaviorSequence> {
        match response {
            Response::Stay => None,
            // First placement snaps straight to the seat.
            Response::ClaimDefault { target } => {
                Some(BehaviorSequence::new(response.label(), Some(Destination::Seat(target))))
            }
            Response::Glare { toward } => Some(self.plan_glare(response, registry, current, toward)),
            _ => Some(self.plan_relocation(response, registry)),
        }
    }

    fn timeout_ticks(&self, timing: &ReactionTiming) -> u64 {
        self.clock.ticks_for_secs(timing.timeout_secs)
    }

    fn plan_glare(
        &self,
        response: Response,
        registry: &SeatRegistry,
        current:  Pose,
        toward:   SeatIndex,
    ) -> BehaviorSequence {
        let timing = &self.timing.glare;
        let facing = registry
            .get(toward)
            .and_then(|seat| Quat::look_horizontal(seat.anchor_position() - current.position))
            .unwrap_or(current.orientation);

        let mut seq = BehaviorSequence::new(response.label(), None).step(BehaviorStep::MoveTo {
            target: current.with_orientation(facing),
            mode:   MotionMode::Interpolate,
            settle: None,
        });
        seq.steps.extend(self.reaction_steps(Reaction::Glare, timing));
        seq
    }

    fn plan_relocation(&self, response: Response, registry: &SeatRegistry) -> BehaviorSequence {
        let timing = self.timing.for_response(response).cloned().unwrap_or_default();
        let timeout_ticks = self.timeout_ticks(&timing);

        let target = response.destination().and_then(|dest| {
            let pose = anchor_pose(registry, dest);
            if pose.is_none() {
                warn!(response = response.label(), ?dest, "destination not configured; move skipped");
            }
            pose.map(|p| (dest, p))
        });

        let mut seq = BehaviorSequence::new(response.label(), target.map(|(dest, _)| dest));
        if let Some(reaction) = response.reaction() {
            seq.steps.extend(self.reaction_steps(reaction, &timing));
        } else if timing.await_idle {
            seq.steps.push(BehaviorStep::WaitForIdle { timeout_ticks });
        }

        if let Some((dest, pose)) = target {
            if timing.stand_up {
                seq.steps.push(BehaviorStep::Emit(AnimationEvent::Trigger(Reaction::StandUp)));
                seq.steps.push(BehaviorStep::WaitForAnimationState {
                    reaction: Reaction::StandUp,
                    timeout_ticks,
                });
            }
            let settle = match (self.mode, dest) {
                (MotionMode::Walk, Destination::Seat(_)) => Some(Reaction::Sit),
                (MotionMode::Walk, Destination::Floor)   => Some(Reaction::SitOnFloor),
                (MotionMode::Interpolate, _)              => None,
            };
            seq.steps.push(BehaviorStep::MoveTo { target: pose, mode: self.mode, settle });
        }
        seq
    }

    /// Trigger plus whichever waits `timing` asks for.
    fn reaction_steps(&self, reaction: Reaction, timing: &ReactionTiming) -> Vec<BehaviorStep> {
        let timeout_ticks = self.timeout_ticks(timing);
        let mut steps = vec![BehaviorStep::Emit(AnimationEvent::Trigger(reaction))];
        if timing.await_reaction {
            steps.push(BehaviorStep::WaitForAnimationState { reaction, timeout_ticks });
        }
        if timing.await_idle {
            steps.push(BehaviorStep::WaitForIdle { timeout_ticks });
        }
        steps
    }
}

/// Exact resting pose for `dest`, or `None` if it is not configured.
pub fn anchor_pose(registry: &SeatRegistry, dest: Destination) -> Option<Pose> {
    match dest {
        Destination::Seat(index) => registry.get(index).map(|s| s.anchor_pose()),
        Destination::Floor       => registry.floor().map(|f| f.anchor_pose()),
    }
}

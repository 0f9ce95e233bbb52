//! `BehaviorSequencer` — runs one behavior sequence, step by step, across ticks.

use tracing::{debug, info, warn};

use shadow_behavior::{
    AnimState, AnimationEvent, Animator, BehaviorSequence, BehaviorStep, Destination, ModeGate,
    Reaction,
};
use shadow_core::{MotionMode, Pose, SequenceHandle, Tick};
use shadow_motion::{MotionStatus, MovementController};

/// A reaction clip counts as finished at this normalized progress.
pub const COMPLETION_PROGRESS: f32 = 0.99;

/// Borrowed collaborators for one [`BehaviorSequencer::poll`].
pub struct SequencerContext<'a> {
    pub now:      Tick,
    pub dt_secs:  f32,
    pub animator: &'a mut dyn Animator,
    pub gate:     &'a dyn ModeGate,
    pub mover:    &'a mut MovementController,
    pub pose:     &'a mut Pose,
}

impl SequencerContext<'_> {
    /// Fire `event` unless the mode gate is asserted.  Returns whether the
    /// animator received it.
    fn emit(&mut self, event: AnimationEvent) -> bool {
        if self.gate.is_asserted() {
            debug!(%event, "mode gate asserted; event suppressed");
            false
        } else {
            self.animator.fire(&event);
            true
        }
    }
}

/// A sequence that ran to its end.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedSequence {
    pub handle:      SequenceHandle,
    pub label:       &'static str,
    pub destination: Option<Destination>,
    /// Waits that ended by timeout rather than by the animator.
    pub timeouts:    u32,
}

/// How a sequence ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequenceOutcome {
    Completed { timeouts: u32 },
    Superseded,
}

/// Result of one poll.
#[derive(Clone, Debug, PartialEq)]
pub enum SequencePoll {
    /// Nothing is running.
    Idle,
    /// Blocked on a wait or a move.
    Pending,
    /// The last step finished this poll.
    Done(CompletedSequence),
}

/// Per-step progress, reset whenever the cursor advances.
#[derive(Debug, Default)]
struct StepProgress {
    started:    Option<Tick>,
    /// The awaited state has been observed at least once.
    entered:    bool,
    /// Move step: effective mode once begun.
    move_mode:  Option<MotionMode>,
    /// Last locomotion speed the animator actually received.
    last_speed: Option<f32>,
}

#[derive(Debug)]
struct Running {
    handle:   SequenceHandle,
    sequence: BehaviorSequence,
    cursor:   usize,
    step:     StepProgress,
    timeouts: u32,
}

enum StepPoll {
    Pending,
    Done,
}

/// Executes at most one [`BehaviorSequence`] at a time.
///
/// Steps run strictly in order; a poll keeps advancing through steps that
/// finish immediately and stops at the first one that has to wait.  Waits
/// are non-blocking re-checks on later polls.  Starting a new sequence
/// abandons the running one where it stands.
#[derive(Debug)]
pub struct BehaviorSequencer {
    running:     Option<Running>,
    last_handle: SequenceHandle,
}

impl Default for BehaviorSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorSequencer {
    pub fn new() -> Self {
        Self { running: None, last_handle: SequenceHandle(0) }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn current_handle(&self) -> Option<SequenceHandle> {
        self.running.as_ref().map(|r| r.handle)
    }

    pub fn current_label(&self) -> Option<&'static str> {
        self.running.as_ref().map(|r| r.sequence.label)
    }

    /// `true` if the running sequence will change where the shadow is.
    pub fn is_relocating(&self) -> bool {
        self.running.as_ref().is_some_and(|r| r.sequence.relocates())
    }

    /// Start `sequence`, cancelling any running one.  Returns the new
    /// handle and the handle of the superseded sequence, if any.
    pub fn start(
        &mut self,
        sequence: BehaviorSequence,
        mover:    &mut MovementController,
    ) -> (SequenceHandle, Option<SequenceHandle>) {
        let superseded = self.cancel(mover);
        let handle = self.last_handle.next();
        self.last_handle = handle;
        info!(%handle, label = sequence.label, steps = sequence.steps.len(), "sequence started");
        self.running = Some(Running {
            handle,
            sequence,
            cursor: 0,
            step: StepProgress::default(),
            timeouts: 0,
        });
        (handle, superseded)
    }

    /// Abandon the running sequence and stop any move it started.  Events
    /// already emitted are not rolled back.
    pub fn cancel(&mut self, mover: &mut MovementController) -> Option<SequenceHandle> {
        let running = self.running.take()?;
        mover.cancel();
        debug!(handle = %running.handle, label = running.sequence.label, step = running.cursor, "sequence cancelled");
        Some(running.handle)
    }

    /// Advance the running sequence as far as it can go this tick.
    pub fn poll(&mut self, cx: &mut SequencerContext<'_>) -> SequencePoll {
        let Some(running) = self.running.as_mut() else {
            return SequencePoll::Idle;
        };

        while running.cursor < running.sequence.steps.len() {
            let step = &running.sequence.steps[running.cursor];
            match run_step(step, &mut running.step, &mut running.timeouts, running.handle, cx) {
                StepPoll::Pending => return SequencePoll::Pending,
                StepPoll::Done => {
                    running.cursor += 1;
                    running.step = StepProgress::default();
                }
            }
        }

        match self.running.take() {
            Some(done) => {
                info!(handle = %done.handle, label = done.sequence.label, timeouts = done.timeouts, "sequence completed");
                SequencePoll::Done(CompletedSequence {
                    handle:      done.handle,
                    label:       done.sequence.label,
                    destination: done.sequence.destination,
                    timeouts:    done.timeouts,
                })
            }
            None => SequencePoll::Idle,
        }
    }
}

fn run_step(
    step:     &BehaviorStep,
    progress: &mut StepProgress,
    timeouts: &mut u32,
    handle:   SequenceHandle,
    cx:       &mut SequencerContext<'_>,
) -> StepPoll {
    match *step {
        BehaviorStep::Emit(event) => {
            cx.emit(event);
            StepPoll::Done
        }

        BehaviorStep::WaitForAnimationState { reaction, timeout_ticks } => {
            // Nothing was fired, so there is nothing to wait for.
            if cx.gate.is_asserted() {
                return StepPoll::Done;
            }
            let started = *progress.started.get_or_insert(cx.now);
            let sample = cx.animator.current_state();
            if sample.state == AnimState::Playing(reaction) {
                progress.entered = true;
                if sample.progress >= COMPLETION_PROGRESS {
                    return StepPoll::Done;
                }
            } else if progress.entered {
                return StepPoll::Done;
            }
            check_timeout(cx.now, started, timeout_ticks, timeouts, handle, step)
        }

        BehaviorStep::WaitForIdle { timeout_ticks } => {
            if cx.gate.is_asserted() {
                return StepPoll::Done;
            }
            let started = *progress.started.get_or_insert(cx.now);
            if cx.animator.current_state().state.is_idle() {
                return StepPoll::Done;
            }
            check_timeout(cx.now, started, timeout_ticks, timeouts, handle, step)
        }

        BehaviorStep::MoveTo { target, mode, settle } => {
            let mode = match progress.move_mode {
                Some(m) => m,
                None => {
                    let m = cx.mover.begin(*cx.pose, target, mode);
                    progress.move_mode = Some(m);
                    m
                }
            };
            match cx.mover.step(cx.pose, cx.dt_secs) {
                MotionStatus::Walking { speed } => {
                    if progress.last_speed != Some(speed) && cx.emit(AnimationEvent::LocomotionSpeed(speed)) {
                        progress.last_speed = Some(speed);
                    }
                    StepPoll::Pending
                }
                MotionStatus::Moving { .. } => StepPoll::Pending,
                MotionStatus::Arrived | MotionStatus::Idle => {
                    // Short hops are interpolated even in walk mode but still settle.
                    if mode == MotionMode::Walk {
                        cx.emit(AnimationEvent::LocomotionSpeed(0.0));
                    }
                    if let Some(reaction) = settle {
                        cx.emit(AnimationEvent::Trigger(reaction));
                    }
                    StepPoll::Done
                }
            }
        }
    }
}

fn check_timeout(
    now:           Tick,
    started:       Tick,
    timeout_ticks: u64,
    timeouts:      &mut u32,
    handle:        SequenceHandle,
    step:          &BehaviorStep,
) -> StepPoll {
    if now.since(started) >= timeout_ticks {
        *timeouts += 1;
        let awaited = match step {
            BehaviorStep::WaitForAnimationState { reaction, .. } => Some(*reaction),
            _ => None,
        };
        warn!(%handle, step = step.kind(), awaited = ?awaited.map(Reaction::trigger_name), timeout_ticks, "wait timed out; continuing");
        StepPoll::Done
    } else {
        StepPoll::Pending
    }
}

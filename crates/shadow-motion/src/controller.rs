//! `MovementController` — advances the shadow's pose toward a target.

use tracing::debug;

use shadow_core::{MotionMode, Pose, Quat, Vec3, smoothstep};

use crate::{MotionConfig, MotionResult, MoveState};

/// What one [`MovementController::step`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MotionStatus {
    /// No move in progress.
    Idle,
    /// Interpolating; `progress` is the linear fraction of the duration.
    Moving { progress: f32 },
    /// Walking at `speed` m/s.
    Walking { speed: f32 },
    /// The pose now equals the target exactly.  Reported once.
    Arrived,
}

/// Drives one entity between poses, one tick at a time.
///
/// Interpolation eases position and orientation from start to target over
/// `move_duration_secs`.  Walking moves along the floor plane at
/// `walk_speed`, turning toward the direction of travel at most
/// `rotation_speed_degrees` per second, and snaps to the exact target once
/// within `stopping_distance`.
#[derive(Debug, Clone)]
pub struct MovementController {
    config: MotionConfig,
    active: Option<MoveState>,
}

impl MovementController {
    pub fn new(config: MotionConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self { config, active: None })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<&MoveState> {
        self.active.as_ref()
    }

    /// The mode a move from `from` to `to` would use.  Walks shorter than
    /// `min_walk_distance` (horizontally) are interpolated.
    pub fn effective_mode(&self, from: Pose, to: Pose, requested: MotionMode) -> MotionMode {
        match requested {
            MotionMode::Walk
                if (to.position - from.position).horizontal().length() < self.config.min_walk_distance =>
            {
                MotionMode::Interpolate
            }
            other => other,
        }
    }

    /// Start moving from `from` to `target`, replacing any move in progress.
    /// Returns the mode actually used.
    pub fn begin(&mut self, from: Pose, target: Pose, mode: MotionMode) -> MotionMode {
        let mode = self.effective_mode(from, target, mode);
        if self.active.is_some() {
            debug!("move replaced before arrival");
        }
        self.active = Some(MoveState {
            start: from,
            target,
            mode,
            elapsed_secs: 0.0,
            duration_secs: self.config.move_duration_secs,
        });
        mode
    }

    /// Abandon the move in progress, leaving the pose where it is.  Returns
    /// `true` if a move was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Advance by `dt_secs`, writing the new pose into `pose`.
    pub fn step(&mut self, pose: &mut Pose, dt_secs: f32) -> MotionStatus {
        let Some(state) = self.active.as_mut() else {
            return MotionStatus::Idle;
        };
        state.elapsed_secs += dt_secs.max(0.0);

        let status = match state.mode {
            MotionMode::Interpolate => interpolate(state, pose),
            MotionMode::Walk        => walk(&self.config, state, pose, dt_secs),
        };
        if status == MotionStatus::Arrived {
            self.active = None;
        }
        status
    }
}

fn interpolate(state: &MoveState, pose: &mut Pose) -> MotionStatus {
    let progress = state.progress();
    if progress >= 1.0 {
        *pose = state.target;
        return MotionStatus::Arrived;
    }
    *pose = state.start.interpolate(state.target, smoothstep(progress));
    MotionStatus::Moving { progress }
}

fn walk(config: &MotionConfig, state: &MoveState, pose: &mut Pose, dt_secs: f32) -> MotionStatus {
    let goal = Vec3::new(state.target.position.x, pose.position.y, state.target.position.z);
    let to_goal = (goal - pose.position).horizontal();
    let distance = to_goal.length();

    if distance <= config.stopping_distance {
        *pose = state.target;
        return MotionStatus::Arrived;
    }

    let Some(dir) = to_goal.normalized() else {
        *pose = state.target;
        return MotionStatus::Arrived;
    };
    let stride = (config.walk_speed * dt_secs.max(0.0)).min(distance);
    pose.position = pose.position + dir * stride;
    if let Some(heading) = Quat::look_horizontal(dir) {
        pose.orientation = pose
            .orientation
            .rotate_towards(heading, config.rotation_speed_degrees * dt_secs.max(0.0));
    }
    MotionStatus::Walking { speed: config.walk_speed }
}

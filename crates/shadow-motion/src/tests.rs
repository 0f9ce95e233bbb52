//! Unit tests for shadow-motion.

use shadow_core::{MotionMode, Pose, Quat, Vec3};

use crate::{MotionConfig, MotionStatus, MovementController};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn controller() -> MovementController {
    MovementController::new(MotionConfig::default()).unwrap()
}

/// Step until arrival; returns every status seen, `Arrived` last.
fn run_to_arrival(mc: &mut MovementController, pose: &mut Pose, dt: f32) -> Vec<MotionStatus> {
    let mut seen = Vec::new();
    for _ in 0..10_000 {
        let s = mc.step(pose, dt);
        seen.push(s);
        if s == MotionStatus::Arrived {
            return seen;
        }
    }
    panic!("never arrived; last status {:?}", seen.last());
}

// ── MoveState ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod move_state {
    use super::*;
    use crate::MoveState;

    #[test]
    fn progress_is_clamped() {
        let mut s = MoveState {
            start:         Pose::default(),
            target:        Pose::default(),
            mode:          MotionMode::Interpolate,
            elapsed_secs:  0.5,
            duration_secs: 2.0,
        };
        assert!((s.progress() - 0.25).abs() < 1e-6);
        s.elapsed_secs = 5.0;
        assert_eq!(s.progress(), 1.0);
        s.duration_secs = 0.0;
        assert_eq!(s.progress(), 1.0);
    }
}

// ── Interpolation ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod interpolation {
    use super::*;

    #[test]
    fn eases_and_lands_exactly() {
        let mut mc = controller();
        let mut pose = Pose::default();
        let target = Pose::from_yaw(Vec3::new(2.0, 0.5, 0.0), 90.0);
        assert_eq!(mc.begin(pose, target, MotionMode::Interpolate), MotionMode::Interpolate);

        assert_eq!(mc.step(&mut pose, 0.25), MotionStatus::Moving { progress: 0.25 });
        // smoothstep(0.25) = 0.15625, slower than linear at the start.
        assert!((pose.position.x - 2.0 * 0.15625).abs() < 1e-5);

        let statuses = run_to_arrival(&mut mc, &mut pose, 0.25);
        assert_eq!(statuses.len(), 3);
        assert_eq!(pose, target);
        assert!(!mc.is_moving());
        assert_eq!(mc.step(&mut pose, 0.25), MotionStatus::Idle);
    }

    #[test]
    fn turn_in_place_keeps_position() {
        let mut mc = controller();
        let start = Pose::from_yaw(Vec3::new(1.0, 0.0, 1.0), 0.0);
        let mut pose = start;
        mc.begin(pose, start.with_orientation(Quat::from_yaw_degrees(-90.0)), MotionMode::Interpolate);
        run_to_arrival(&mut mc, &mut pose, 1.0 / 60.0);
        assert_eq!(pose.position, start.position);
        assert!((pose.orientation.yaw_degrees() + 90.0).abs() < 1e-2);
    }
}

// ── Walk ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walk {
    use super::*;

    fn walker() -> MovementController {
        MovementController::new(MotionConfig { mode: MotionMode::Walk, ..MotionConfig::default() }).unwrap()
    }

    #[test]
    fn constant_speed_then_snap() {
        let mut mc = walker();
        let mut pose = Pose::default();
        let target = Pose::from_yaw(Vec3::new(3.0, 0.45, 0.0), 180.0);
        assert_eq!(mc.begin(pose, target, MotionMode::Walk), MotionMode::Walk);

        assert_eq!(mc.step(&mut pose, 0.1), MotionStatus::Walking { speed: 1.2 });
        assert!((pose.position.x - 0.12).abs() < 1e-5);
        assert_eq!(pose.position.y, 0.0, "walks stay on the floor plane");

        let statuses = run_to_arrival(&mut mc, &mut pose, 0.1);
        assert!(statuses[..statuses.len() - 1]
            .iter()
            .all(|s| *s == MotionStatus::Walking { speed: 1.2 }));
        // 3 m at 0.12 m per step, plus the arrival step.
        assert!((24..=27).contains(&statuses.len()), "took {} steps", statuses.len());
        assert_eq!(pose, target, "arrival snaps position and orientation");
    }

    #[test]
    fn turns_toward_travel_direction_at_limited_rate() {
        let mut mc = walker();
        let mut pose = Pose::default(); // facing +Z
        mc.begin(pose, Pose::from_yaw(Vec3::new(5.0, 0.0, 0.0), 0.0), MotionMode::Walk);

        mc.step(&mut pose, 0.1); // 36° per step
        assert!((pose.orientation.yaw_degrees() - 36.0).abs() < 0.5);
        mc.step(&mut pose, 0.1);
        mc.step(&mut pose, 0.1);
        assert!((pose.orientation.yaw_degrees() - 90.0).abs() < 1e-2);
    }

    #[test]
    fn short_walk_is_interpolated() {
        let mc = walker();
        let from = Pose::default();
        let near = Pose::from_yaw(Vec3::new(0.2, 0.0, 0.0), 0.0);
        let far = Pose::from_yaw(Vec3::new(0.0, 0.0, 0.5), 0.0);
        assert_eq!(mc.effective_mode(from, near, MotionMode::Walk), MotionMode::Interpolate);
        assert_eq!(mc.effective_mode(from, far, MotionMode::Walk), MotionMode::Walk);
        assert_eq!(mc.effective_mode(from, far, MotionMode::Interpolate), MotionMode::Interpolate);
    }

    #[test]
    fn cancel_stops_in_place() {
        let mut mc = walker();
        let mut pose = Pose::default();
        mc.begin(pose, Pose::from_yaw(Vec3::new(5.0, 0.0, 0.0), 0.0), MotionMode::Walk);
        mc.step(&mut pose, 0.5);
        let here = pose;
        assert!(mc.cancel());
        assert!(!mc.cancel());
        assert_eq!(mc.step(&mut pose, 0.5), MotionStatus::Idle);
        assert_eq!(pose, here);
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults_from_empty_document() {
        let c: MotionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, MotionConfig::default());
        assert_eq!(c.mode, MotionMode::Interpolate);
        assert_eq!(c.walk_speed, 1.2);
        assert_eq!(c.min_walk_distance, 0.3);
    }

    #[test]
    fn walk_mode_parses() {
        let c: MotionConfig = serde_json::from_str(r#"{ "mode": "walk", "walk_speed": 0.8 }"#).unwrap();
        assert_eq!(c.mode, MotionMode::Walk);
        assert_eq!(c.walk_speed, 0.8);
    }

    #[test]
    fn rejects_bad_values() {
        for bad in [
            MotionConfig { move_duration_secs: 0.0, ..MotionConfig::default() },
            MotionConfig { walk_speed: -1.0, ..MotionConfig::default() },
            MotionConfig { rotation_speed_degrees: f32::NAN, ..MotionConfig::default() },
            MotionConfig { stopping_distance: -0.1, ..MotionConfig::default() },
        ] {
            assert!(MovementController::new(bad).is_err());
        }
    }
}

//! Unit tests for shadow-core primitives.

#[cfg(test)]
mod ids {
    use crate::{SeatIndex, SequenceHandle};

    #[test]
    fn index_roundtrip() {
        let id = SeatIndex(4);
        assert_eq!(id.index(), 4);
        assert_eq!(SeatIndex::try_from(4usize).unwrap(), id);
        assert!(SeatIndex::try_from(70_000usize).is_err());
    }

    #[test]
    fn adjacency_is_symmetric() {
        for a in 0..6u16 {
            for b in 0..6u16 {
                assert_eq!(
                    SeatIndex(a).is_adjacent(SeatIndex(b)),
                    SeatIndex(b).is_adjacent(SeatIndex(a)),
                );
            }
        }
        assert!(SeatIndex(2).is_adjacent(SeatIndex(3)));
        assert!(!SeatIndex(2).is_adjacent(SeatIndex(2)));
        assert!(!SeatIndex(0).is_adjacent(SeatIndex(2)));
    }

    #[test]
    fn distance_is_absolute() {
        assert_eq!(SeatIndex(1).distance(SeatIndex(4)), 3);
        assert_eq!(SeatIndex(4).distance(SeatIndex(1)), 3);
    }

    #[test]
    fn handles_are_monotonic() {
        let h = SequenceHandle(7);
        assert_eq!(h.next(), SequenceHandle(8));
        assert!(h < h.next());
    }

    #[test]
    fn display() {
        assert_eq!(SeatIndex(3).to_string(), "SeatIndex(3)");
    }
}

#[cfg(test)]
mod pose {
    use crate::{Pose, Quat, Vec3, smoothstep};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-2
    }

    #[test]
    fn yaw_roundtrip() {
        for deg in [-135.0f32, -90.0, 0.0, 45.0, 90.0, 170.0] {
            let q = Quat::from_yaw_degrees(deg);
            assert!(close(q.yaw_degrees(), deg), "yaw {deg} -> {}", q.yaw_degrees());
        }
    }

    #[test]
    fn look_horizontal_ignores_height() {
        let q = Quat::look_horizontal(Vec3::new(1.0, 5.0, 0.0)).unwrap();
        assert!(close(q.yaw_degrees(), 90.0));
        assert!(Quat::look_horizontal(Vec3::new(0.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn rotate_forward() {
        let q = Quat::from_yaw_degrees(90.0);
        let v = q.rotate(Vec3::FORWARD);
        assert!(close(v.x, 1.0) && close(v.z, 0.0), "got {v}");
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quat::from_yaw_degrees(0.0);
        let b = Quat::from_yaw_degrees(90.0);
        assert!(a.slerp(b, 0.0).angle_to(a) < 0.1);
        assert!(a.slerp(b, 1.0).angle_to(b) < 0.1);
        assert!(close(a.slerp(b, 0.5).yaw_degrees(), 45.0));
    }

    #[test]
    fn rotate_towards_is_bounded() {
        let a = Quat::from_yaw_degrees(0.0);
        let b = Quat::from_yaw_degrees(90.0);
        let step = a.rotate_towards(b, 10.0);
        assert!(close(step.yaw_degrees(), 10.0));
        assert_eq!(a.rotate_towards(b, 180.0), b);
    }

    #[test]
    fn smoothstep_shape() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(2.0), 1.0);
        assert!(close(smoothstep(0.5), 0.5));
        // Eased: slower than linear near the start.
        assert!(smoothstep(0.1) < 0.1);
    }

    #[test]
    fn pose_interpolate_midpoint() {
        let a = Pose::from_yaw(Vec3::ZERO, 0.0);
        let b = Pose::from_yaw(Vec3::new(2.0, 0.0, 0.0), 90.0);
        let mid = a.interpolate(b, 0.5);
        assert!(close(mid.position.x, 1.0));
        assert!(close(mid.orientation.yaw_degrees(), 45.0));
    }

    #[test]
    fn vec3_serializes_as_array() {
        let v: Vec3 = serde_json::from_str("[1.0, 2.0, 3.0]").unwrap();
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.0,2.0,3.0]");
    }
}

#[cfg(test)]
mod time {
    use crate::{ClockConfig, ControlClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(2), Tick(12));
        assert_eq!(Tick(15).since(t), 5);
        assert_eq!(t.since(Tick(15)), 0);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = ControlClock::new(60);
        assert_eq!(clock.ticks_for_secs(1.0), 60);
        assert_eq!(clock.ticks_for_secs(0.01), 1);
        assert_eq!(clock.ticks_for_secs(0.1), 6);
        assert_eq!(clock.ticks_for_secs(0.0), 0);
        assert_eq!(clock.ticks_for_secs(-3.0), 0);
        assert_eq!(clock.ticks_for_secs(f32::NAN), 0);
    }

    #[test]
    fn advance_and_elapsed() {
        let mut clock = ControlClock::new(10);
        for _ in 0..25 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(25));
        assert!((clock.elapsed_secs() - 2.5).abs() < 1e-9);
        assert!((clock.dt_secs() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_rejected_by_config() {
        assert!(ClockConfig { tick_rate_hz: 0 }.validate().is_err());
        assert!(ClockConfig::default().validate().is_ok());
        assert_eq!(ClockConfig::default().make_clock().tick_rate_hz, 60);
    }
}

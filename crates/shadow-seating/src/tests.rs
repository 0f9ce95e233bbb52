//! Unit tests for shadow-seating.

use shadow_core::{SeatIndex, Vec3};

use crate::{FloorSpec, SeatRegistry, SeatRegistryBuilder, SeatSpec};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `n` seats in a row along X, ids `s0..s{n-1}`, facing -Z.
fn row(n: usize) -> Vec<SeatSpec> {
    (0..n)
        .map(|i| SeatSpec::new(format!("s{i}"), Vec3::new(i as f32, 0.0, 0.0), 180.0))
        .collect()
}

fn registry(n: usize) -> SeatRegistry {
    SeatRegistryBuilder::new()
        .seats(row(n))
        .floor(FloorSpec::new(Vec3::new(0.0, 0.0, -2.0), 180.0))
        .build()
        .unwrap()
}

fn occupy(reg: &mut SeatRegistry, seats: &[u16]) {
    for &i in seats {
        reg.set_human_occupied(SeatIndex(i), true);
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::SeatingError;

    #[test]
    fn indices_follow_registration_order() {
        let reg = registry(4);
        for (i, seat) in reg.seats().iter().enumerate() {
            assert_eq!(seat.index(), SeatIndex(i as u16));
            assert_eq!(seat.id(), format!("s{i}"));
        }
        assert_eq!(reg.find("s2").map(|s| s.index()), Some(SeatIndex(2)));
        assert!(reg.find("nope").is_none());
    }

    #[test]
    fn default_seat_falls_back_to_first() {
        assert_eq!(registry(3).default_seat(), SeatIndex(0));
        let reg = SeatRegistryBuilder::new().seats(row(3)).default_seat("s1").build().unwrap();
        assert_eq!(reg.default_seat(), SeatIndex(1));
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(SeatRegistryBuilder::new().build(), Err(SeatingError::NoSeats)));

        let mut dup = row(2);
        dup[1].id = "s0".into();
        assert!(matches!(
            SeatRegistryBuilder::new().seats(dup).build(),
            Err(SeatingError::DuplicateSeat(id)) if id == "s0"
        ));

        assert!(matches!(
            SeatRegistryBuilder::new().seats(row(2)).default_seat("ghost").build(),
            Err(SeatingError::UnknownDefaultSeat(_))
        ));

        let mut blank = row(1);
        blank[0].id = "  ".into();
        assert!(matches!(
            SeatRegistryBuilder::new().seats(blank).build(),
            Err(SeatingError::EmptySeatId(0))
        ));
    }

    #[test]
    fn shadow_flag_is_exclusive() {
        let mut reg = registry(3);
        assert_eq!(reg.shadow_seat(), None);
        reg.assign_shadow(Some(SeatIndex(1)));
        assert_eq!(reg.shadow_seat(), Some(SeatIndex(1)));
        reg.assign_shadow(Some(SeatIndex(2)));
        assert_eq!(reg.seats().iter().filter(|s| s.shadow_occupied()).count(), 1);
        assert_eq!(reg.shadow_seat(), Some(SeatIndex(2)));
        reg.assign_shadow(None);
        assert_eq!(reg.shadow_seat(), None);
    }

    #[test]
    fn anchor_pose_applies_height_and_look_target() {
        let reg = SeatRegistryBuilder::new()
            .seat(
                SeatSpec::new("a", Vec3::new(0.0, 0.0, 0.0), 0.0)
                    .with_height_offset(0.5)
                    .with_look_target(Vec3::new(3.0, 2.0, 0.0)),
            )
            .build()
            .unwrap();
        let pose = reg.seats()[0].anchor_pose();
        assert_eq!(pose.position, Vec3::new(0.0, 0.5, 0.0));
        assert!((pose.orientation.yaw_degrees() - 90.0).abs() < 1e-2);
    }

    #[test]
    fn apply_snapshot_keeps_unmentioned_seats_and_marks_active() {
        use crate::OccupancySnapshot;

        let mut reg = registry(3);
        occupy(&mut reg, &[2]);
        let snap = OccupancySnapshot::new(Some("s1".into()), 0.9).with_seat("s0", false);
        let changed = reg.apply_snapshot(&snap);
        assert_eq!(changed, 1); // s1 became occupied via the active id
        assert!(!reg.seats()[0].human_occupied());
        assert!(reg.seats()[1].human_occupied());
        assert!(reg.seats()[2].human_occupied(), "unmentioned seat keeps its flag");
    }

    #[test]
    fn all_occupied() {
        let mut reg = registry(3);
        occupy(&mut reg, &[0, 1]);
        assert!(!reg.all_human_occupied());
        occupy(&mut reg, &[2]);
        assert!(reg.all_human_occupied());
        assert_eq!(reg.free_seats().count(), 0);
    }
}

// ── Selection policy ──────────────────────────────────────────────────────────

#[cfg(test)]
mod selection_tests {
    use super::*;
    use crate::find_best_seat;

    #[test]
    fn collision_tie_breaks_to_lowest_index() {
        // Shadow on seat 1, visitor sits on seat 1.
        let mut reg = registry(3);
        reg.assign_shadow(Some(SeatIndex(1)));
        occupy(&mut reg, &[1]);
        assert_eq!(find_best_seat(&reg, Some(SeatIndex(1)), false, false), Some(SeatIndex(0)));
    }

    #[test]
    fn adjacent_with_gap_skips_neighbours() {
        // Shadow on seat 1, visitor sits on seat 0.
        let mut reg = registry(3);
        reg.assign_shadow(Some(SeatIndex(1)));
        occupy(&mut reg, &[0]);
        assert_eq!(find_best_seat(&reg, Some(SeatIndex(0)), true, false), Some(SeatIndex(2)));
    }

    #[test]
    fn gap_requirement_can_leave_nothing() {
        let mut reg = registry(3);
        reg.assign_shadow(Some(SeatIndex(2)));
        occupy(&mut reg, &[1]);
        // Free: 0 and 2; 2 is current, 0 is adjacent to 1.
        assert_eq!(find_best_seat(&reg, Some(SeatIndex(1)), true, false), None);
    }

    #[test]
    fn allow_current_keeps_own_seat() {
        let mut reg = registry(2);
        reg.assign_shadow(Some(SeatIndex(1)));
        occupy(&mut reg, &[0]);
        assert_eq!(find_best_seat(&reg, Some(SeatIndex(0)), false, true), Some(SeatIndex(1)));
        assert_eq!(find_best_seat(&reg, Some(SeatIndex(0)), false, false), None);
    }

    #[test]
    fn farthest_first() {
        let reg = registry(6);
        assert_eq!(find_best_seat(&reg, Some(SeatIndex(1)), false, true), Some(SeatIndex(5)));
        assert_eq!(find_best_seat(&reg, Some(SeatIndex(4)), false, true), Some(SeatIndex(0)));
    }

    #[test]
    fn no_reference_measures_from_default() {
        let reg = SeatRegistryBuilder::new().seats(row(5)).default_seat("s3").build().unwrap();
        assert_eq!(find_best_seat(&reg, None, false, false), Some(SeatIndex(0)));
    }

    #[test]
    fn deterministic_and_order_independent() {
        // Same occupancy reached through different mutation orders.
        let mut a = registry(7);
        let mut b = registry(7);
        occupy(&mut a, &[3, 0, 6]);
        occupy(&mut b, &[6, 3, 0]);
        for reference in 0..7u16 {
            for gap in [false, true] {
                let ra = find_best_seat(&a, Some(SeatIndex(reference)), gap, true);
                let rb = find_best_seat(&b, Some(SeatIndex(reference)), gap, true);
                assert_eq!(ra, rb);
                assert_eq!(ra, find_best_seat(&a, Some(SeatIndex(reference)), gap, true));
            }
        }
    }

    #[test]
    fn full_house_yields_none() {
        let mut reg = registry(3);
        occupy(&mut reg, &[0, 1, 2]);
        assert_eq!(find_best_seat(&reg, None, false, true), None);
    }
}

// ── Snapshot parsing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use serde_json::json;

    use crate::{OccupancySnapshot, SnapshotError};

    #[test]
    fn explicit_seat_list() {
        let snap = OccupancySnapshot::parse(&json!({
            "activeSeatId": "b",
            "confidence": 0.75,
            "seats": [
                { "id": "a", "occupied": false },
                { "id": "b", "occupied": true, "bounds": { "xMin": 0.0 } },
            ]
        }))
        .unwrap();
        assert_eq!(snap.active_seat_id(), Some("b"));
        assert!((snap.confidence() - 0.75).abs() < 1e-6);
        assert_eq!(snap.seat_order(), ["a", "b"]);
        assert_eq!(snap.occupied("a"), Some(false));
        assert_eq!(snap.occupied("b"), Some(true));
        assert_eq!(snap.occupied("c"), None, "absent is unknown, not false");
    }

    #[test]
    fn occupied_id_list_and_map_merge() {
        let snap = OccupancySnapshot::parse(&json!({
            "active_seat_id": null,
            "occupied_seat_ids": ["c", "a"],
            "occupancy": { "b": false, "a": false, "d": true }
        }))
        .unwrap();
        assert_eq!(snap.active_seat_id(), None);
        assert_eq!(snap.seat_order(), ["c", "a", "b", "d"]);
        assert_eq!(snap.occupied("a"), Some(true), "later false does not clear");
        assert_eq!(snap.occupied("b"), Some(false));
        assert_eq!(snap.occupied("d"), Some(true));
    }

    #[test]
    fn nested_under_seating_key() {
        let snap = OccupancySnapshot::parse(&json!({
            "timestamp": 12,
            "seating": { "activeSeatId": "x", "confidence": 2.0, "seats": [] }
        }))
        .unwrap();
        assert_eq!(snap.active_seat_id(), Some("x"));
        assert_eq!(snap.confidence(), 1.0, "confidence is clamped");
        assert!(snap.is_empty());
    }

    #[test]
    fn numeric_ids_and_flags() {
        let snap = OccupancySnapshot::parse(&json!({
            "seats": [ { "seatId": 3, "occupied": 1 } ]
        }))
        .unwrap();
        assert_eq!(snap.occupied("3"), Some(true));
    }

    #[test]
    fn malformed_inputs_are_errors() {
        assert_eq!(OccupancySnapshot::parse(&json!([1, 2])), Err(SnapshotError::NotAnObject));
        assert_eq!(OccupancySnapshot::parse(&json!({})), Err(SnapshotError::NoOccupancy));
        assert_eq!(
            OccupancySnapshot::parse(&json!({ "confidence": 0.4 })),
            Err(SnapshotError::NoOccupancy)
        );
        assert!(matches!(
            OccupancySnapshot::parse(&json!({ "seats": "a,b" })),
            Err(SnapshotError::Malformed { field: "seats", .. })
        ));
        assert!(matches!(
            OccupancySnapshot::parse(&json!({ "seats": [ { "id": "a" } ] })),
            Err(SnapshotError::Malformed { .. })
        ));
        assert!(matches!(
            OccupancySnapshot::parse(&json!({ "activeSeatId": true })),
            Err(SnapshotError::Malformed { field: "activeSeatId", .. })
        ));
        assert!(matches!(
            OccupancySnapshot::parse(&json!({ "activeSeatId": "a", "confidence": "high" })),
            Err(SnapshotError::Malformed { field: "confidence", .. })
        ));
        assert!(matches!(
            OccupancySnapshot::from_json_str("{not json"),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn only_active_seat_is_enough() {
        let snap = OccupancySnapshot::from_json_str(r#"{ "activeSeatId": "a" }"#).unwrap();
        assert_eq!(snap.active_seat_id(), Some("a"));
        assert_eq!(snap.confidence(), 0.0);
    }
}

// ── Change detection ──────────────────────────────────────────────────────────

#[cfg(test)]
mod change_tests {
    use crate::{ChangeDetector, OccupancySnapshot, has_changed};

    fn snap(active: Option<&str>, seats: &[(&str, bool)]) -> OccupancySnapshot {
        seats.iter().fold(
            OccupancySnapshot::new(active.map(str::to_owned), 0.5),
            |s, &(id, occ)| s.with_seat(id, occ),
        )
    }

    #[test]
    fn identical_is_unchanged() {
        let a = snap(Some("x"), &[("x", true), ("y", false)]);
        assert!(!has_changed(&a, &a.clone()));
    }

    #[test]
    fn confidence_alone_is_not_a_change() {
        let a = OccupancySnapshot::new(Some("x".into()), 0.2);
        let b = OccupancySnapshot::new(Some("x".into()), 0.9);
        assert!(!has_changed(&a, &b));
    }

    #[test]
    fn active_seat_or_flag_change() {
        let a = snap(Some("x"), &[("x", true)]);
        assert!(has_changed(&a, &snap(Some("y"), &[("x", true)])));
        assert!(has_changed(&a, &snap(Some("x"), &[("x", false)])));
        assert!(has_changed(&a, &snap(None, &[("x", true)])));
    }

    #[test]
    fn presence_mismatch_is_a_change_both_ways() {
        let a = snap(None, &[("x", false)]);
        let b = snap(None, &[("x", false), ("y", false)]);
        assert!(has_changed(&a, &b));
        assert!(has_changed(&b, &a));
    }

    #[test]
    fn detector_suppresses_duplicates() {
        let mut det = ChangeDetector::new();
        let a = snap(Some("x"), &[("x", true)]);
        assert!(det.admit(&a), "first snapshot always admitted");
        assert!(!det.admit(&a));
        assert!(!det.admit(&a.clone()));
        assert_eq!(det.suppressed(), 2);
        let b = snap(None, &[("x", false)]);
        assert!(det.admit(&b));
        assert_eq!(det.last(), Some(&b));
        det.reset();
        assert!(det.admit(&b));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use super::*;
    use crate::{SeatingError, load_seats_csv, load_seats_reader};

    const CSV: &str = "\
id,x,y,z,yaw_degrees,height_offset,look_x,look_y,look_z
left,-1.2,0.0,2.0,180,0.45,,,
middle,0.0,0.0,2.0,180,0.45,0.0,1.2,-1.0
right,1.2,0.0,2.0,,,,,
";

    #[test]
    fn loads_rows_in_order() {
        let specs = load_seats_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].id, "left");
        assert_eq!(specs[0].position, Vec3::new(-1.2, 0.0, 2.0));
        assert_eq!(specs[0].look_target, None);
        assert_eq!(specs[1].look_target, Some(Vec3::new(0.0, 1.2, -1.0)));
        assert_eq!(specs[2].yaw_degrees, None);
        assert_eq!(specs[2].height_offset, 0.0);

        let reg = SeatRegistryBuilder::new().seats(specs).build().unwrap();
        assert_eq!(reg.index_of("right"), Some(SeatIndex(2)));
    }

    #[test]
    fn partial_look_target_rejected() {
        let bad = "id,x,y,z,yaw_degrees,height_offset,look_x,look_y,look_z\na,0,0,0,0,0,1,,\n";
        assert!(matches!(load_seats_reader(Cursor::new(bad)), Err(SeatingError::Parse(_))));
    }

    #[test]
    fn bad_number_rejected() {
        let bad = "id,x,y,z\na,zero,0,0\n";
        assert!(matches!(load_seats_reader(Cursor::new(bad)), Err(SeatingError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seats.csv");
        std::fs::write(&path, CSV).unwrap();
        assert_eq!(load_seats_csv(&path).unwrap().len(), 3);
        assert!(matches!(
            load_seats_csv(&dir.path().join("missing.csv")),
            Err(SeatingError::Io(_))
        ));
    }
}

// ── Seat layout ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout_tests {
    use serde_json::json;

    use crate::{SeatLayout, SeatRegion, SeatingError};

    fn three_regions() -> SeatLayout {
        SeatLayout::new([
            SeatRegion::new("seat-a", 0.0, 0.0, 0.3, 0.8),
            SeatRegion::new("seat-b", 0.3, 0.0, 0.6, 0.8),
            SeatRegion::new("seat-c", 0.6, 0.0, 1.0, 0.8),
        ])
        .unwrap()
    }

    #[test]
    fn selects_containing_region_with_confidence() {
        let layout = three_regions();
        let snap = layout
            .evaluate(&json!({
                "root_center_normalized": { "x": 0.35, "y": 0.5 },
                "frame_dimensions": { "width": 1920, "height": 1080 }
            }))
            .unwrap();
        assert_eq!(snap.active_seat_id(), Some("seat-b"));
        assert_eq!(snap.occupied("seat-b"), Some(true));
        assert_eq!(snap.occupied("seat-a"), Some(false));
        assert_eq!(snap.seat_order(), ["seat-a", "seat-b", "seat-c"]);
        assert!((snap.confidence() - 1.0 / 3.0).abs() < 1e-5, "got {}", snap.confidence());
    }

    #[test]
    fn pixel_coordinates_fallback() {
        let layout = SeatLayout::new([
            SeatRegion::new("seat-a", 0.0, 0.0, 0.5, 0.5),
            SeatRegion::new("seat-b", 0.5, 0.0, 1.0, 0.5),
        ])
        .unwrap();
        let snap = layout
            .evaluate(&json!({
                "root_center_pixel": { "x": 1200, "y": 200 },
                "frame_dimensions": { "width": 1600, "height": 400 }
            }))
            .unwrap();
        assert_eq!(snap.active_seat_id(), Some("seat-b"));
    }

    #[test]
    fn no_root_no_snapshot() {
        let layout = three_regions();
        assert!(layout.evaluate(&json!({ "frame_dimensions": { "width": 0, "height": 0 } })).is_none());
        assert!(layout.evaluate(&json!({
            "root_center_pixel": { "x": 1, "y": 1 },
            "frame_dimensions": { "width": 0, "height": 10 }
        })).is_none());
    }

    #[test]
    fn outside_every_region_is_unoccupied() {
        let snap = three_regions().evaluate_point(0.5, 0.95);
        assert_eq!(snap.active_seat_id(), None);
        assert_eq!(snap.confidence(), 0.0);
        assert!(snap.iter().all(|(_, occ)| !occ));
    }

    #[test]
    fn from_json_validation() {
        let layout = SeatLayout::from_json_value(&json!({
            "seats": [
                { "id": "s1", "bounds": { "xMin": 0.0, "xMax": 0.5, "yMin": 0.0, "yMax": 0.5 } },
                { "seatId": "s2", "bounds": { "xMin": 0.5, "xMax": 1.0, "yMin": 0.0, "yMax": 0.5 } },
            ]
        }))
        .unwrap();
        assert_eq!(layout.regions().len(), 2);

        assert!(matches!(SeatLayout::new(Vec::<SeatRegion>::new()), Err(SeatingError::NoSeats)));
        assert!(matches!(
            SeatLayout::from_json_value(&json!({ "seats": [ { "id": "s1" } ] })),
            Err(SeatingError::Parse(_))
        ));
        assert!(matches!(
            SeatLayout::new([SeatRegion::new("s", 0.5, 0.0, 0.5, 1.0)]),
            Err(SeatingError::InvalidBounds { .. })
        ));
        assert!(matches!(
            SeatLayout::new([
                SeatRegion::new("s", 0.0, 0.0, 0.5, 1.0),
                SeatRegion::new("s", 0.5, 0.0, 1.0, 1.0),
            ]),
            Err(SeatingError::DuplicateSeat(_))
        ));
    }

    #[test]
    fn integer_region_ids_are_stringified() {
        let layout = SeatLayout::from_json_value(&json!({
            "seats": [
                { "id": 1, "bounds": { "xMin": 0.0, "xMax": 0.5, "yMin": 0.0, "yMax": 1.0 } },
                { "seatId": 2, "bounds": { "xMin": 0.5, "xMax": 1.0, "yMin": 0.0, "yMax": 1.0 } },
            ]
        }))
        .unwrap();
        let ids: Vec<&str> = layout.regions().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(layout.evaluate_point(0.75, 0.5).active_seat_id(), Some("2"));

        assert!(matches!(
            SeatLayout::from_json_value(&json!({
                "seats": [ { "id": 1.5, "bounds": { "xMin": 0.0, "xMax": 0.5, "yMin": 0.0, "yMax": 1.0 } } ]
            })),
            Err(SeatingError::Parse(_))
        ));
    }
}

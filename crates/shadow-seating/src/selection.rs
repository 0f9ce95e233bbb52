//! Seat-selection policy.

use std::cmp::Reverse;

use shadow_core::SeatIndex;

use crate::SeatRegistry;

/// Choose the free seat that maximizes separation from `reference`.
///
/// 1. Candidates are seats without a visitor.
/// 2. Unless `allow_current`, the shadow's own seat is excluded.
/// 3. With `require_gap`, seats within one index of the reference are
///    excluded, leaving at least one empty seat between visitor and shadow.
/// 4. Candidates rank farthest-first by index distance; ties go to the
///    lowest index.
///
/// With no `reference`, distance is measured from the default seat.
/// `None` means no seat qualifies; callers fall back to the floor.
pub fn find_best_seat(
    registry:      &SeatRegistry,
    reference:     Option<SeatIndex>,
    require_gap:   bool,
    allow_current: bool,
) -> Option<SeatIndex> {
    let reference = reference.unwrap_or_else(|| registry.default_seat());
    let current = registry.shadow_seat();

    registry
        .free_seats()
        .map(|s| s.index())
        .filter(|&i| allow_current || Some(i) != current)
        .filter(|&i| !require_gap || i.distance(reference) > 1)
        .min_by_key(|&i| (Reverse(i.distance(reference)), i))
}

//! Debounce: only snapshots that differ from the last applied one proceed.

use tracing::trace;

use crate::OccupancySnapshot;

/// `true` iff the active seat differs or any seat's flag differs.
///
/// A seat present in one snapshot and absent from the other counts as a
/// change.  Confidence alone never does.
pub fn has_changed(previous: &OccupancySnapshot, next: &OccupancySnapshot) -> bool {
    if previous.active_seat_id() != next.active_seat_id() {
        return true;
    }
    let differs = |a: &OccupancySnapshot, b: &OccupancySnapshot| {
        a.seat_order().iter().any(|id| a.occupied(id) != b.occupied(id))
    };
    differs(previous, next) || differs(next, previous)
}

/// Remembers the last applied snapshot and suppresses duplicates.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last:       Option<OccupancySnapshot>,
    suppressed: u64,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `next` if it differs from the last applied snapshot.
    ///
    /// The first snapshot is always admitted.  Admitted snapshots become the
    /// new comparison baseline; suppressed ones are dropped.
    pub fn admit(&mut self, next: &OccupancySnapshot) -> bool {
        let changed = match &self.last {
            None       => true,
            Some(prev) => has_changed(prev, next),
        };
        if changed {
            self.last = Some(next.clone());
        } else {
            self.suppressed += 1;
            trace!(suppressed = self.suppressed, "duplicate snapshot suppressed");
        }
        changed
    }

    /// The last admitted snapshot.
    pub fn last(&self) -> Option<&OccupancySnapshot> {
        self.last.as_ref()
    }

    /// How many snapshots have been suppressed so far.
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    /// Forget the baseline so the next snapshot is admitted unconditionally.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

//! The `SeatRegistry` — fixed seat collection plus the floor anchor.
//!
//! Created once at startup and never resized.  All occupancy mutation goes
//! through the methods here so the shadow flag can be held by at most one
//! seat at a time.

use std::collections::HashMap;

use tracing::debug;

use shadow_core::SeatIndex;

use crate::{FloorAnchor, FloorSpec, OccupancySnapshot, Seat, SeatSpec, SeatingError, SeatingResult};

/// Holds every configured seat (indexed by `SeatIndex`), the default seat,
/// and the optional floor anchor.
#[derive(Clone, Debug)]
pub struct SeatRegistry {
    seats:        Vec<Seat>,
    by_id:        HashMap<String, SeatIndex>,
    default_seat: SeatIndex,
    floor:        Option<FloorAnchor>,
}

impl SeatRegistry {
    // ── Lookup ────────────────────────────────────────────────────────────

    /// Number of seats.  Always at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// All seats in index order.
    #[inline]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[inline]
    pub fn get(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.get(index.index())
    }

    /// Resolve a seat id.  Unknown ids are `None`, never an error.
    pub fn find(&self, id: &str) -> Option<&Seat> {
        self.index_of(id).and_then(|i| self.get(i))
    }

    pub fn index_of(&self, id: &str) -> Option<SeatIndex> {
        self.by_id.get(id).copied()
    }

    /// The seat the shadow prefers when it has a free choice.
    #[inline]
    pub fn default_seat(&self) -> SeatIndex {
        self.default_seat
    }

    /// `None` when no floor was configured.
    #[inline]
    pub fn floor(&self) -> Option<&FloorAnchor> {
        self.floor.as_ref()
    }

    /// The seat currently holding the shadow, if any.
    pub fn shadow_seat(&self) -> Option<SeatIndex> {
        self.seats.iter().find(|s| s.shadow_occupied).map(|s| s.index)
    }

    /// `true` when every seat has a visitor on it.
    pub fn all_human_occupied(&self) -> bool {
        self.seats.iter().all(|s| s.human_occupied)
    }

    /// Seats without a visitor, in index order.
    pub fn free_seats(&self) -> impl Iterator<Item = &Seat> + '_ {
        self.seats.iter().filter(|s| !s.human_occupied)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Set one seat's visitor flag.  Returns `true` if the flag changed.
    pub fn set_human_occupied(&mut self, index: SeatIndex, occupied: bool) -> bool {
        match self.seats.get_mut(index.index()) {
            Some(seat) if seat.human_occupied != occupied => {
                seat.human_occupied = occupied;
                true
            }
            _ => false,
        }
    }

    /// Copy a snapshot's flags onto the registry.
    ///
    /// Seats the snapshot does not mention keep their previous flag.  The
    /// active seat, when it resolves, is always marked occupied.  Ids that
    /// are not registered are ignored.  Returns the number of flags changed.
    pub fn apply_snapshot(&mut self, snapshot: &OccupancySnapshot) -> usize {
        let mut changed = 0;
        for (id, occupied) in snapshot.iter() {
            match self.index_of(id) {
                Some(index) => changed += usize::from(self.set_human_occupied(index, occupied)),
                None => debug!(seat = id, "snapshot mentions unregistered seat; ignored"),
            }
        }
        if let Some(active) = snapshot.active_seat_id().and_then(|id| self.index_of(id)) {
            changed += usize::from(self.set_human_occupied(active, true));
        }
        changed
    }

    /// Move the shadow flag to `seat`, or clear it entirely with `None`
    /// (shadow on the floor or not yet placed).
    pub fn assign_shadow(&mut self, seat: Option<SeatIndex>) {
        for s in &mut self.seats {
            s.shadow_occupied = Some(s.index) == seat;
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`SeatRegistry`].
///
/// Seat indices are assigned in the order seats are added.
///
/// ```rust
/// use shadow_core::Vec3;
/// use shadow_seating::{SeatRegistryBuilder, SeatSpec};
///
/// let registry = SeatRegistryBuilder::new()
///     .seat(SeatSpec::new("left",  Vec3::new(-1.0, 0.0, 0.0), 0.0))
///     .seat(SeatSpec::new("right", Vec3::new( 1.0, 0.0, 0.0), 0.0))
///     .default_seat("right")
///     .build()
///     .unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Default)]
pub struct SeatRegistryBuilder {
    seats:        Vec<SeatSpec>,
    default_seat: Option<String>,
    floor:        Option<FloorSpec>,
}

impl SeatRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(mut self, spec: SeatSpec) -> Self {
        self.seats.push(spec);
        self
    }

    pub fn seats(mut self, specs: impl IntoIterator<Item = SeatSpec>) -> Self {
        self.seats.extend(specs);
        self
    }

    /// Preferred seat id.  If never called, the first seat is the default.
    pub fn default_seat(mut self, id: impl Into<String>) -> Self {
        self.default_seat = Some(id.into());
        self
    }

    pub fn floor(mut self, spec: FloorSpec) -> Self {
        self.floor = Some(spec);
        self
    }

    /// Validate ids and construct the registry with every seat free.
    pub fn build(self) -> SeatingResult<SeatRegistry> {
        if self.seats.is_empty() {
            return Err(SeatingError::NoSeats);
        }
        if self.seats.len() > u16::MAX as usize {
            return Err(SeatingError::TooManySeats(self.seats.len()));
        }

        let mut by_id = HashMap::with_capacity(self.seats.len());
        let mut seats = Vec::with_capacity(self.seats.len());
        for (i, spec) in self.seats.iter().enumerate() {
            if spec.id.trim().is_empty() {
                return Err(SeatingError::EmptySeatId(i));
            }
            let index = SeatIndex(i as u16);
            if by_id.insert(spec.id.clone(), index).is_some() {
                return Err(SeatingError::DuplicateSeat(spec.id.clone()));
            }
            seats.push(Seat::from_spec(spec, index));
        }

        let default_seat = match self.default_seat {
            None     => SeatIndex(0),
            Some(id) => *by_id.get(&id).ok_or(SeatingError::UnknownDefaultSeat(id))?,
        };

        Ok(SeatRegistry {
            seats,
            by_id,
            default_seat,
            floor: self.floor.as_ref().map(FloorAnchor::from_spec),
        })
    }
}

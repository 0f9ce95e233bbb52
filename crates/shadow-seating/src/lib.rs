//! `shadow-seating` — seats, occupancy snapshots, and the selection policy.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`seat`]      | `Seat`, `SeatSpec`, `FloorAnchor`, `FloorSpec`               |
//! | [`registry`]  | `SeatRegistry` (owns all occupancy flags), `SeatRegistryBuilder` |
//! | [`snapshot`]  | `OccupancySnapshot`, tolerant `parse` of upstream metadata   |
//! | [`change`]    | `has_changed`, `ChangeDetector` (debounce)                   |
//! | [`selection`] | `find_best_seat` — farthest-first, lowest-index tie-break    |
//! | [`layout`]    | `SeatLayout` — camera-space seat regions → snapshots         |
//! | [`loader`]    | `load_seats_csv`, `load_seats_reader`                        |
//! | [`error`]     | `SeatingError`, `SnapshotError`                              |
//!
//! # Ownership of occupancy
//!
//! `Seat` exposes its flags read-only.  The only writers are the registry's
//! mutation methods: `apply_snapshot` for the human flags and
//! `assign_shadow` for the shadow flag, which keeps "at most one seat holds
//! the shadow" true by construction.

pub mod change;
pub mod error;
pub mod layout;
pub mod loader;
pub mod registry;
pub mod seat;
pub mod selection;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use change::{ChangeDetector, has_changed};
pub use error::{SeatingError, SeatingResult, SnapshotError, SnapshotResult};
pub use layout::{SeatLayout, SeatRegion, root_from_metadata};
pub use loader::{load_seats_csv, load_seats_reader};
pub use registry::{SeatRegistry, SeatRegistryBuilder};
pub use seat::{FloorAnchor, FloorSpec, Seat, SeatSpec};
pub use selection::find_best_seat;
pub use snapshot::OccupancySnapshot;

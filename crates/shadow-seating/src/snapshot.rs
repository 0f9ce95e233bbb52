//! Per-tick occupancy snapshots and the tolerant upstream parser.
//!
//! # Accepted encodings
//!
//! Upstream producers describe the same concept several ways; any subset may
//! be present in one document and they are merged:
//!
//! ```json
//! {
//!   "activeSeatId": "seat-b",
//!   "confidence": 0.8,
//!   "seats": [ { "id": "seat-a", "occupied": false }, { "id": "seat-b", "occupied": true } ],
//!   "occupiedSeatIds": [ "seat-b" ],
//!   "occupancy": { "seat-c": false }
//! }
//! ```
//!
//! The document may also be wrapped as `{ "seating": { … } }`, and
//! `snake_case` spellings (`active_seat_id`, `occupied_seat_ids`) are
//! accepted.  Seat order is the first-seen order across the encodings in the
//! order listed above.  A seat marked occupied by any encoding is occupied.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{SnapshotError, SnapshotResult};

const ACTIVE_KEYS:   [&str; 2] = ["activeSeatId", "active_seat_id"];
const OCCUPIED_KEYS: [&str; 4] = ["occupiedSeatIds", "occupied_seat_ids", "occupiedSeats", "occupied_seats"];
const MAP_KEYS:      [&str; 1] = ["occupancy"];

/// Which seat (if any) a visitor is actively using, how sure the upstream
/// is, and per-seat occupancy flags.
///
/// Immutable once built.  Seats missing from the snapshot are *unknown*, not
/// free: use [`occupied`][Self::occupied], which distinguishes the two.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct OccupancySnapshot {
    active_seat_id: Option<String>,
    confidence:     f32,
    occupancy:      HashMap<String, bool>,
    seat_order:     Vec<String>,
}

impl OccupancySnapshot {
    /// Snapshot with no per-seat information.  `confidence` is clamped to
    /// `[0, 1]`; NaN becomes 0.
    pub fn new(active_seat_id: Option<String>, confidence: f32) -> Self {
        Self {
            active_seat_id: active_seat_id.filter(|id| !id.is_empty()),
            confidence:     clamp_confidence(confidence),
            occupancy:      HashMap::new(),
            seat_order:     Vec::new(),
        }
    }

    /// Return a copy with `id` merged in.  First-seen order is preserved and
    /// an occupied flag is never downgraded by a later `false`.
    pub fn with_seat(mut self, id: impl Into<String>, occupied: bool) -> Self {
        self.merge_seat(id.into(), occupied);
        self
    }

    fn merge_seat(&mut self, id: String, occupied: bool) {
        match self.occupancy.get_mut(&id) {
            Some(flag) => *flag |= occupied,
            None => {
                self.seat_order.push(id.clone());
                self.occupancy.insert(id, occupied);
            }
        }
    }

    #[inline]
    pub fn active_seat_id(&self) -> Option<&str> {
        self.active_seat_id.as_deref()
    }

    #[inline]
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// `Some(flag)` if the snapshot mentions `id`, `None` if it does not.
    #[inline]
    pub fn occupied(&self, id: &str) -> Option<bool> {
        self.occupancy.get(id).copied()
    }

    /// Seat ids in first-seen order.
    #[inline]
    pub fn seat_order(&self) -> &[String] {
        &self.seat_order
    }

    /// `(id, occupied)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.seat_order
            .iter()
            .map(|id| (id.as_str(), self.occupancy.get(id).copied().unwrap_or(false)))
    }

    pub fn len(&self) -> usize {
        self.seat_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seat_order.is_empty()
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    /// Parse a JSON document.  See the module docs for accepted shapes.
    pub fn from_json_str(raw: &str) -> SnapshotResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| SnapshotError::Json(e.to_string()))?;
        Self::parse(&value)
    }

    /// Parse an already-decoded metadata value.
    pub fn parse(raw: &Value) -> SnapshotResult<Self> {
        let root = raw.as_object().ok_or(SnapshotError::NotAnObject)?;
        let obj = match root.get("seating") {
            None                     => root,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(malformed("seating", "expected an object"));
            }
        };

        let active = parse_active(obj)?;
        let confidence = match obj.get("confidence") {
            None | Some(Value::Null) => 0.0,
            Some(v) => v
                .as_f64()
                .ok_or_else(|| malformed("confidence", "expected a number"))? as f32,
        };

        let mut snapshot = OccupancySnapshot::new(active, confidence);
        let mut saw_occupancy = false;

        if let Some(seats) = obj.get("seats") {
            saw_occupancy = true;
            let entries = seats
                .as_array()
                .ok_or_else(|| malformed("seats", "expected an array"))?;
            for entry in entries {
                let (id, occupied) = parse_seat_entry(entry)?;
                snapshot.merge_seat(id, occupied);
            }
        }

        for key in OCCUPIED_KEYS {
            let Some(list) = obj.get(key) else { continue };
            saw_occupancy = true;
            let ids = list
                .as_array()
                .ok_or_else(|| malformed("occupiedSeatIds", "expected an array of seat ids"))?;
            for id in ids {
                let id = seat_id(id).ok_or_else(|| malformed("occupiedSeatIds", "expected seat id strings"))?;
                snapshot.merge_seat(id, true);
            }
        }

        for key in MAP_KEYS {
            let Some(map) = obj.get(key) else { continue };
            saw_occupancy = true;
            let map = map
                .as_object()
                .ok_or_else(|| malformed("occupancy", "expected an object of seat id → bool"))?;
            for (id, flag) in map {
                let occupied = occupied_flag(flag)
                    .ok_or_else(|| malformed("occupancy", format!("seat {id:?} flag is not a boolean")))?;
                snapshot.merge_seat(id.clone(), occupied);
            }
        }

        if !saw_occupancy && snapshot.active_seat_id.is_none() {
            return Err(SnapshotError::NoOccupancy);
        }
        Ok(snapshot)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn clamp_confidence(c: f32) -> f32 {
    if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) }
}

fn malformed(field: &'static str, reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Malformed { field, reason: reason.into() }
}

fn parse_active(obj: &Map<String, Value>) -> SnapshotResult<Option<String>> {
    for key in ACTIVE_KEYS {
        match obj.get(key) {
            None | Some(Value::Null) => continue,
            Some(v) => {
                return seat_id(v)
                    .map(Some)
                    .ok_or_else(|| malformed("activeSeatId", "expected a string or null"));
            }
        }
    }
    Ok(None)
}

/// Seat ids are strings; integer ids are accepted and stringified.
fn seat_id(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

fn occupied_flag(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b)   => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

fn parse_seat_entry(entry: &Value) -> SnapshotResult<(String, bool)> {
    let obj = entry
        .as_object()
        .ok_or_else(|| malformed("seats", "each entry must be an object"))?;
    let id = obj
        .get("id")
        .or_else(|| obj.get("seatId"))
        .and_then(seat_id)
        .ok_or_else(|| malformed("seats", "entry missing a seat id"))?;
    let occupied = obj
        .get("occupied")
        .and_then(occupied_flag)
        .ok_or_else(|| malformed("seats", format!("seat {id:?} missing a boolean 'occupied'")))?;
    Ok((id, occupied))
}

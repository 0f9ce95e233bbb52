//! Where snapshots come from.
//!
//! The controller pulls frames from a [`SnapshotSource`] each tick, so a
//! live feed, a scripted rehearsal, and the manual seat override all drive
//! the same evaluation path.

use std::sync::mpsc::{Receiver, TryRecvError};

use serde_json::Value;
use tracing::debug;

use shadow_core::{SeatIndex, Tick};
use shadow_seating::{OccupancySnapshot, SeatLayout, SeatRegistry, SnapshotError, SnapshotResult};

/// A pull-based stream of occupancy frames.
pub trait SnapshotSource {
    /// The next frame available at `now`, oldest first.  `None` once nothing
    /// more is available this tick.
    fn next_frame(&mut self, now: Tick) -> Option<SnapshotResult<OccupancySnapshot>>;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &mut S {
    fn next_frame(&mut self, now: Tick) -> Option<SnapshotResult<OccupancySnapshot>> {
        (**self).next_frame(now)
    }
}

/// A source that never yields.  Ticks only advance running sequences.
pub struct NoSource;

impl SnapshotSource for NoSource {
    fn next_frame(&mut self, _now: Tick) -> Option<SnapshotResult<OccupancySnapshot>> {
        None
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Frame {
    Parsed(OccupancySnapshot),
    Raw(String),
}

/// Frames released at fixed ticks.  Frames for the same tick come out in
/// insertion order; raw frames are parsed when released.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    frames: Vec<(Tick, Frame)>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release `snapshot` at `tick`.
    pub fn at(mut self, tick: Tick, snapshot: OccupancySnapshot) -> Self {
        self.push(tick, Frame::Parsed(snapshot));
        self
    }

    /// Release the JSON document `raw` at `tick`.
    pub fn raw_at(mut self, tick: Tick, raw: impl Into<String>) -> Self {
        self.push(tick, Frame::Raw(raw.into()));
        self
    }

    fn push(&mut self, tick: Tick, frame: Frame) {
        // Stable insert keeps same-tick frames in insertion order.
        let pos = self.frames.partition_point(|(t, _)| *t <= tick);
        self.frames.insert(pos, (tick, frame));
    }

    /// Frames not yet released.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }
}

impl SnapshotSource for ScriptedSource {
    fn next_frame(&mut self, now: Tick) -> Option<SnapshotResult<OccupancySnapshot>> {
        let (tick, frame) = self.frames.get(self.cursor)?;
        if *tick > now {
            return None;
        }
        self.cursor += 1;
        Some(match frame {
            Frame::Parsed(s) => Ok(s.clone()),
            Frame::Raw(raw)  => OccupancySnapshot::from_json_str(raw),
        })
    }
}

// ── ManualOccupancy ───────────────────────────────────────────────────────────

/// Debug override: per-seat occupancy set by index, without a live feed.
///
/// Every change marks the source dirty; the next poll yields one snapshot
/// listing every seat.  The most recently occupied seat is the active one.
#[derive(Clone, Debug)]
pub struct ManualOccupancy {
    ids:        Vec<String>,
    occupied:   Vec<bool>,
    active:     Option<SeatIndex>,
    confidence: f32,
    dirty:      bool,
}

impl ManualOccupancy {
    /// All seats free, confidence 1.
    pub fn from_registry(registry: &SeatRegistry) -> Self {
        Self {
            ids:        registry.seats().iter().map(|s| s.id().to_owned()).collect(),
            occupied:   vec![false; registry.len()],
            active:     None,
            confidence: 1.0,
            dirty:      false,
        }
    }

    /// Set one seat.  Out-of-range indices are ignored.
    pub fn set(&mut self, index: SeatIndex, occupied: bool) -> &mut Self {
        let Some(flag) = self.occupied.get_mut(index.index()) else {
            debug!(%index, "override for unknown seat ignored");
            return self;
        };
        *flag = occupied;
        if occupied {
            self.active = Some(index);
        } else if self.active == Some(index) {
            self.active = None;
        }
        self.dirty = true;
        self
    }

    /// Flip one seat.
    pub fn toggle(&mut self, index: SeatIndex) -> &mut Self {
        let current = self.occupied.get(index.index()).copied().unwrap_or(false);
        self.set(index, !current)
    }

    /// Free every seat.
    pub fn clear(&mut self) -> &mut Self {
        self.occupied.iter_mut().for_each(|f| *f = false);
        self.active = None;
        self.dirty = true;
        self
    }

    pub fn set_confidence(&mut self, confidence: f32) -> &mut Self {
        self.confidence = confidence;
        self.dirty = true;
        self
    }

    /// The snapshot the current overrides describe.
    pub fn snapshot(&self) -> OccupancySnapshot {
        let active = self.active.and_then(|i| self.ids.get(i.index()).cloned());
        self.ids
            .iter()
            .zip(&self.occupied)
            .fold(OccupancySnapshot::new(active, self.confidence), |snap, (id, &occ)| {
                snap.with_seat(id.clone(), occ)
            })
    }
}

impl SnapshotSource for ManualOccupancy {
    fn next_frame(&mut self, _now: Tick) -> Option<SnapshotResult<OccupancySnapshot>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(Ok(self.snapshot()))
    }
}

// ── ChannelSource ─────────────────────────────────────────────────────────────

/// Live feed: metadata documents pushed by another thread.
///
/// With a [`SeatLayout`] the documents are skeleton metadata resolved
/// through the layout; without one they are occupancy snapshots.
pub struct ChannelSource {
    rx:     Receiver<Value>,
    layout: Option<SeatLayout>,
}

impl ChannelSource {
    pub fn new(rx: Receiver<Value>) -> Self {
        Self { rx, layout: None }
    }

    pub fn with_layout(rx: Receiver<Value>, layout: SeatLayout) -> Self {
        Self { rx, layout: Some(layout) }
    }
}

impl SnapshotSource for ChannelSource {
    fn next_frame(&mut self, _now: Tick) -> Option<SnapshotResult<OccupancySnapshot>> {
        match self.rx.try_recv() {
            Ok(doc) => Some(match &self.layout {
                Some(layout) => layout.evaluate(&doc).ok_or(SnapshotError::NoOccupancy),
                None         => OccupancySnapshot::parse(&doc),
            }),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

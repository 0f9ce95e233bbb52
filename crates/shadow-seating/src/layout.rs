//! Camera-space seat regions.
//!
//! Turns a tracked skeleton's root position into an [`OccupancySnapshot`]:
//! every region is listed, the first region containing the root is occupied
//! and active, and confidence measures how deep inside that region the root
//! sits (1.0 at the centre, 0.0 on the edge).
//!
//! Layout files use the upstream capture tool's shape:
//!
//! ```json
//! { "seats": [ { "id": "s1", "bounds": { "xMin": 0.0, "xMax": 0.5, "yMin": 0.0, "yMax": 0.5 } } ] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{OccupancySnapshot, SeatingError, SeatingResult};

/// Normalized `[0, 1]` image-space rectangle for one seat.
#[derive(Clone, Debug, PartialEq)]
pub struct SeatRegion {
    pub id:    String,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl SeatRegion {
    pub fn new(id: impl Into<String>, x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self { id: id.into(), x_min, y_min, x_max, y_max }
    }

    /// Inclusive on all edges.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    pub fn width(&self) -> f32 {
        (self.x_max - self.x_min).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y_max - self.y_min).max(0.0)
    }

    /// Normalized distance from the nearest edge, in `[0, 1]`.
    pub fn confidence(&self, x: f32, y: f32) -> f32 {
        let half_w = self.width() * 0.5;
        let half_h = self.height() * 0.5;
        if half_w <= 0.0 || half_h <= 0.0 {
            return 0.0;
        }
        let margin_x = (x - self.x_min).min(self.x_max - x);
        let margin_y = (y - self.y_min).min(self.y_max - y);
        if margin_x < 0.0 || margin_y < 0.0 {
            return 0.0;
        }
        (margin_x / half_w).min(margin_y / half_h).clamp(0.0, 1.0)
    }
}

// ── File shape ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LayoutFile {
    seats: Vec<RegionRecord>,
}

#[derive(Deserialize)]
struct RegionRecord {
    #[serde(alias = "seatId", deserialize_with = "region_id")]
    id:     String,
    bounds: BoundsRecord,
}

/// Integer ids are stringified, matching the snapshot parser.
fn region_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("seat id must be a string or an integer, got {other}"))),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundsRecord {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
}

// ── SeatLayout ────────────────────────────────────────────────────────────────

/// Ordered set of seat regions.  Order decides which region wins where two
/// overlap, and is the seat order of produced snapshots.
#[derive(Clone, Debug)]
pub struct SeatLayout {
    regions: Vec<SeatRegion>,
}

impl SeatLayout {
    /// Validate and build.  Requires at least one region, unique ids, and
    /// strictly positive extents.
    pub fn new(regions: impl IntoIterator<Item = SeatRegion>) -> SeatingResult<Self> {
        let regions: Vec<SeatRegion> = regions.into_iter().collect();
        if regions.is_empty() {
            return Err(SeatingError::NoSeats);
        }
        let mut seen = HashSet::with_capacity(regions.len());
        for (i, r) in regions.iter().enumerate() {
            if r.id.is_empty() {
                return Err(SeatingError::EmptySeatId(i));
            }
            if !seen.insert(r.id.as_str()) {
                return Err(SeatingError::DuplicateSeat(r.id.clone()));
            }
            if !(r.x_min < r.x_max && r.y_min < r.y_max) {
                return Err(SeatingError::InvalidBounds { id: r.id.clone() });
            }
        }
        Ok(Self { regions })
    }

    pub fn from_json_value(value: &Value) -> SeatingResult<Self> {
        let file = LayoutFile::deserialize(value)
            .map_err(|e| SeatingError::Parse(e.to_string()))?;
        Self::new(file.seats.into_iter().map(|r| {
            SeatRegion::new(r.id, r.bounds.x_min, r.bounds.y_min, r.bounds.x_max, r.bounds.y_max)
        }))
    }

    pub fn from_json_str(raw: &str) -> SeatingResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| SeatingError::Parse(e.to_string()))?;
        Self::from_json_value(&value)
    }

    pub fn from_path(path: &Path) -> SeatingResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn regions(&self) -> &[SeatRegion] {
        &self.regions
    }

    /// First region containing `(x, y)`.
    pub fn resolve(&self, x: f32, y: f32) -> Option<&SeatRegion> {
        self.regions.iter().find(|r| r.contains(x, y))
    }

    /// Snapshot for a root at normalized `(x, y)`.
    pub fn evaluate_point(&self, x: f32, y: f32) -> OccupancySnapshot {
        let hit = self.resolve(x, y);
        let confidence = hit.map_or(0.0, |r| r.confidence(x, y));
        let active = hit.map(|r| r.id.clone());
        self.regions.iter().fold(
            OccupancySnapshot::new(active, confidence),
            |snap, r| {
                let occupied = hit.is_some_and(|h| h.id == r.id);
                snap.with_seat(r.id.clone(), occupied)
            },
        )
    }

    /// Snapshot for a skeleton's metadata, or `None` if it carries no usable
    /// root position.
    pub fn evaluate(&self, metadata: &Value) -> Option<OccupancySnapshot> {
        let (x, y) = root_from_metadata(metadata)?;
        Some(self.evaluate_point(x, y))
    }
}

/// Extract the skeleton root in normalized image coordinates.
///
/// Prefers `root_center_normalized {x, y}`; falls back to
/// `root_center_pixel {x, y}` divided by `frame_dimensions {width, height}`.
pub fn root_from_metadata(metadata: &Value) -> Option<(f32, f32)> {
    let xy = |v: &Value| Some((v.get("x")?.as_f64()?, v.get("y")?.as_f64()?));

    if let Some(p) = metadata.get("root_center_normalized").and_then(xy) {
        return Some((p.0 as f32, p.1 as f32));
    }

    let (px, py) = metadata.get("root_center_pixel").and_then(xy)?;
    let frame = metadata.get("frame_dimensions")?;
    let w = frame.get("width")?.as_f64()?;
    let h = frame.get("height")?.as_f64()?;
    if w == 0.0 || h == 0.0 {
        return None;
    }
    Some(((px / w) as f32, (py / h) as f32))
}

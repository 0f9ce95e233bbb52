//! CSV seat loader.
//!
//! # CSV format
//!
//! One row per seat, in index order.  The look-target columns are optional
//! (leave all three empty, or omit them from the header).
//!
//! ```csv
//! id,x,y,z,yaw_degrees,height_offset,look_x,look_y,look_z
//! left,-1.2,0.0,2.0,180,0.45,,,
//! middle,0.0,0.0,2.0,180,0.45,0.0,1.2,-1.0
//! right,1.2,0.0,2.0,180,0.45,,,
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use shadow_core::Vec3;

use crate::{SeatSpec, SeatingError, SeatingResult};

#[derive(Deserialize)]
struct SeatRecord {
    id:            String,
    x:             f32,
    y:             f32,
    z:             f32,
    #[serde(default)]
    yaw_degrees:   Option<f32>,
    #[serde(default)]
    height_offset: Option<f32>,
    #[serde(default)]
    look_x:        Option<f32>,
    #[serde(default)]
    look_y:        Option<f32>,
    #[serde(default)]
    look_z:        Option<f32>,
}

/// Load seat specs from a CSV file.
pub fn load_seats_csv(path: &Path) -> SeatingResult<Vec<SeatSpec>> {
    let file = std::fs::File::open(path).map_err(SeatingError::Io)?;
    load_seats_reader(file)
}

/// Like [`load_seats_csv`] but accepts any `Read` source.
pub fn load_seats_reader<R: Read>(reader: R) -> SeatingResult<Vec<SeatSpec>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut specs = Vec::new();

    for (row, result) in csv_reader.deserialize::<SeatRecord>().enumerate() {
        let r = result.map_err(|e| SeatingError::Parse(e.to_string()))?;
        let look_target = match (r.look_x, r.look_y, r.look_z) {
            (Some(x), Some(y), Some(z)) => Some(Vec3::new(x, y, z)),
            (None, None, None)          => None,
            _ => {
                return Err(SeatingError::Parse(format!(
                    "row {}: seat {:?} has a partial look target (need look_x, look_y, look_z)",
                    row + 1,
                    r.id
                )));
            }
        };
        specs.push(SeatSpec {
            id:            r.id,
            position:      Vec3::new(r.x, r.y, r.z),
            yaw_degrees:   r.yaw_degrees,
            orientation:   None,
            look_target,
            height_offset: r.height_offset.unwrap_or(0.0),
        });
    }

    Ok(specs)
}

//! CSV location loader.
//!
//! # CSV format
//!
//! One row per location; names must be unique.
//!
//! ```csv
//! name,x,y
//! park,100,100
//! office,700,150
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{Location, LocationRegistry, MapError, MapResult};

#[derive(Deserialize)]
struct LocationRecord {
    name: String,
    x:    f32,
    y:    f32,
}

/// Load a [`LocationRegistry`] from a CSV file.
pub fn load_locations_csv(path: &Path) -> MapResult<LocationRegistry> {
    let file = std::fs::File::open(path).map_err(MapError::Io)?;
    load_locations_reader(file)
}

/// Like [`load_locations_csv`] but accepts any `Read` source.
pub fn load_locations_reader<R: Read>(reader: R) -> MapResult<LocationRegistry> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize::<LocationRecord>() {
        let row = result.map_err(|e| MapError::Parse(e.to_string()))?;
        let name = row.name.trim();
        if name.is_empty() {
            return Err(MapError::Parse("location with empty name".into()));
        }
        if !row.x.is_finite() || !row.y.is_finite() {
            return Err(MapError::Parse(format!("location {name:?} has non-finite coordinates")));
        }
        entries.push(Location::new(name, row.x, row.y));
    }

    tracing::debug!(count = entries.len(), "loaded locations");
    LocationRegistry::new(entries)
}

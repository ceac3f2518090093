//! The static location registry.
//!
//! A location is a named, fixed point on the map.  Goals refer to locations
//! by key; the registry resolves keys to coordinates and is never mutated
//! after construction.

use std::collections::HashMap;

use town_core::Point;

use crate::{MapError, MapResult};

/// One named point of interest.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name:     String,
    pub position: Point,
}

impl Location {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self { name: name.into(), position: Point::new(x, y) }
    }
}

/// Immutable `name → point` lookup, iterable in insertion order.
#[derive(Clone, Debug, Default)]
pub struct LocationRegistry {
    entries: Vec<Location>,
    by_name: HashMap<String, usize>,
}

impl LocationRegistry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(entries: Vec<Location>) -> MapResult<Self> {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (i, loc) in entries.iter().enumerate() {
            if by_name.insert(loc.name.clone(), i).is_some() {
                return Err(MapError::DuplicateLocation(loc.name.clone()));
            }
        }
        Ok(Self { entries, by_name })
    }

    /// The 23 locations of the reference town on an 800×600 map.
    pub fn default_town() -> Self {
        const TOWN: [(&str, f32, f32); 23] = [
            ("park",           100.0, 100.0),
            ("office",         700.0, 150.0),
            ("cafe",           250.0, 450.0),
            ("animal_shelter",  50.0, 500.0),
            ("library",        400.0,  50.0),
            ("plaza",          400.0, 300.0),
            ("bakery",         550.0, 450.0),
            ("fountain",       400.0, 250.0),
            ("power_plant",    700.0, 500.0),
            ("bar",            150.0, 300.0),
            ("town_hall",       50.0,  50.0),
            ("market",         750.0,  50.0),
            ("school",          50.0, 250.0),
            ("hospital",       750.0, 250.0),
            ("church",         200.0,  50.0),
            ("gym",            600.0,  50.0),
            ("museum",          50.0, 350.0),
            ("theater",        750.0, 350.0),
            ("beach",          200.0, 550.0),
            ("dock",           600.0, 550.0),
            ("forest",         100.0, 400.0),
            ("hills",          500.0, 150.0),
            ("windmill",       650.0, 350.0),
        ];
        let entries: Vec<Location> = TOWN
            .iter()
            .map(|&(name, x, y)| Location::new(name, x, y))
            .collect();
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, l)| (l.name.clone(), i))
            .collect();
        Self { entries, by_name }
    }

    /// Coordinates of `name`, or `None` for an unknown key.
    #[inline]
    pub fn position(&self, name: &str) -> Option<Point> {
        self.by_name.get(name).map(|&i| self.entries[i].position)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

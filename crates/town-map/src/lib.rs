//! `town-map` — named locations and proximity queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`registry`]  | `Location`, `LocationRegistry`, `default_town`           |
//! | [`loader`]    | `load_locations_csv`, `load_locations_reader`            |
//! | [`proximity`] | `ProximityIndex` (R-tree over one tick's agent positions) |
//! | [`error`]     | `MapError`, `MapResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Propagates `Serialize`/`Deserialize` to `town-core` types.   |

pub mod error;
pub mod loader;
pub mod proximity;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use loader::{load_locations_csv, load_locations_reader};
pub use proximity::ProximityIndex;
pub use registry::{Location, LocationRegistry};

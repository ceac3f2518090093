//! `town-core` — foundational types for the town agent scheduler.
//!
//! This crate is a dependency of every other `town-*` crate.  It intentionally
//! has no `town-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TicketId`, `LeaseId`                      |
//! | [`geo`]         | `Point`, `Bounds`                                     |
//! | [`time`]        | `Tick`, `Millis`, `SimClock`                          |
//! | [`config`]      | `TownConfig` — every tuning constant of the town      |
//! | [`rng`]         | `AgentRng` (per-agent)                                |
//! | [`facing`]      | `Facing` enum                                         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod facing;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TownConfig;
pub use error::{CoreError, CoreResult};
pub use facing::Facing;
pub use geo::{Bounds, Point};
pub use ids::{AgentId, LeaseId, TicketId};
pub use rng::AgentRng;
pub use time::{Millis, SimClock, Tick};

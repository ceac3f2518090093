//! `town-schedule` — what each resident intends to do, and in which order.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`goal`]      | `Goal`, `GoalList` (cursor + copy-on-write completion)   |
//! | [`generator`] | `TaskGenerator` — base tasks + sampled exploration tasks |
//! | [`roster`]    | `ResidentDef`, `Roster`, the reference town's residents  |
//! | [`loader`]    | CSV base-task loader                                     |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                     |

pub mod error;
pub mod generator;
pub mod goal;
pub mod loader;
pub mod roster;


pub use error::{ScheduleError, ScheduleResult};
pub use generator::TaskGenerator;
pub use goal::{Goal, GoalList};
pub use loader::{load_tasks_csv, load_tasks_reader, ResidentTasks};
pub use roster::{ResidentDef, Roster, PLAYER_PERSONALITY};

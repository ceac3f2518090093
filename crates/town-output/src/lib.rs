//! `town-output` — CSV output for the town agent scheduler.
//!
//! | File                  | One row per                                   |
//! |-----------------------|-----------------------------------------------|
//! | `agent_snapshots.csv` | agent per snapshot tick (the render view)     |
//! | `events.csv`          | presentation event (bubbles, chat, sessions)  |
//! | `transitions.csv`     | reported state change                         |
//!
//! [`CsvWriter`] implements [`OutputWriter`]; [`TownOutputObserver`] drives
//! any `OutputWriter` from `town_sim::TownObserver` callbacks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use town_output::{CsvWriter, TownOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TownOutputObserver::new(writer);
//! town.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TownOutputObserver;
pub use row::{AgentSnapshotRow, EventRow, TransitionRow};
pub use writer::OutputWriter;

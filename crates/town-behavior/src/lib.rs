//! `town-behavior` — the per-agent activity state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`intent`]  | `Intent`, `StepOutcome` — what one agent's tick produced          |
//! | [`context`] | `SimContext<'a>` — read-only tick snapshot shared by all agents   |
//! | [`model`]   | `BehaviorModel` trait, `reported_state`                           |
//! | [`machine`] | `ActivityMachine` — moving / working / exploring / regenerating   |
//!
//! # Design notes
//!
//! The two-phase tick loop in town-sim works as follows:
//!
//! 1. **Intent phase** (optionally parallel): for every agent call
//!    `BehaviorModel::step` with a clone of its record.  All reads go through
//!    `&SimContext`, which holds the positions every agent had at the start of
//!    the tick; no agent sees another's update from the same tick.
//!
//! 2. **Apply phase** (sequential, ascending id): the returned records replace
//!    the stored ones whole, then encounter proposals are arbitrated.
//!
//! Availability (encounter reservations, player conversations) is decided by
//! town-sim and reaches the machine only as a per-agent "suspended" flag.  A
//! suspended agent reports `idle` and does nothing; its timers and exploration
//! data are left exactly as they were.

pub mod context;
pub mod intent;
pub mod machine;
pub mod model;


pub use context::SimContext;
pub use intent::{Intent, StepOutcome};
pub use machine::ActivityMachine;
pub use model::{reported_state, BehaviorModel};

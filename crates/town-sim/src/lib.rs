//! `town-sim` — the tick loop and the two coordinators that act across agents.
//!
//! # Tick loop
//!
//! ```text
//! every tick at `now`:
//!   ① Replies   — drain the dialogue port; apply personality, encounter,
//!                 and chat replies.
//!   ② Timelines — fire encounter and chat-session entries due at `now`
//!                 (typing, message, retire, history, release, reveal).
//!   ③ Snapshot  — clone agent records, build the proximity index and the
//!                 per-agent suspended flags, read the global latch.
//!   ④ Intents   — BehaviorModel::step for every agent
//!                 (parallel with the `parallel` feature).
//!   ⑤ Apply     — ascending AgentId: replace each record, then arbitrate
//!                 its encounter proposal against latch, leases, cooldowns.
//!   ⑥ Settle    — drain the port and fire timelines again, so a reply
//!                 that is already there anchors on the tick that asked.
//!   ⑦ Report    — state transitions, presentation events, snapshots.
//! ```
//!
//! Every mutation happens on the caller's thread.  The dialogue service is
//! only reached through a [`DialoguePort`](town_dialogue::DialoguePort).
//!
//! # Cargo features
//!
//! | Feature    | Effect                                          |
//! |------------|-------------------------------------------------|
//! | `parallel` | Runs the intent phase on Rayon's thread pool.   |
//! | `fx-hash`  | FxHash for the ticket and cooldown maps.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use town_behavior::ActivityMachine;
//! use town_core::TownConfig;
//! use town_sim::{NoopObserver, TownBuilder};
//!
//! let mut town = TownBuilder::new(TownConfig::default(), ActivityMachine).build()?;
//! town.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod encounter;
pub mod error;
pub mod events;
pub mod observer;
pub mod player;
pub mod reservation;
pub mod timeline;
pub mod town;

#[cfg(test)]
mod tests;

pub use builder::TownBuilder;
pub use encounter::{Encounter, EncounterAction, EncounterCoordinator, EncounterPhase};
pub use error::{InteractionError, ReservationError, SimError, SimResult};
pub use events::{AgentView, PresentationEvent};
pub use observer::{NoopObserver, TownObserver};
pub use player::{ChatSession, PlayerController, SessionAction, SessionState};
pub use reservation::{Availability, ConversationLease, PairLease, ReservationBook};
pub use timeline::Timeline;
pub use town::Town;

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

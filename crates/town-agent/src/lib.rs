//! `town-agent` — the agent record and its storage.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`activity`]     | `Activity` (tagged union), `ActivityState` (reported)    |
//! | [`conversation`] | `ConversationEntry`, `ConversationLog`                   |
//! | [`agent`]        | `Agent`, `Control`, `FrameCounts`                        |
//! | [`store`]        | `AgentStore` (whole-record replacement), `AgentRngs`     |
//! | [`builder`]      | `AgentStoreBuilder` (from a roster)                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Propagates `Serialize`/`Deserialize` to dependency types. |

pub mod activity;
pub mod agent;
pub mod builder;
pub mod conversation;
pub mod store;

#[cfg(test)]
mod tests;

pub use activity::{Activity, ActivityState};
pub use agent::{Agent, Control, FrameCounts};
pub use builder::AgentStoreBuilder;
pub use conversation::{ConversationEntry, ConversationLog};
pub use store::{AgentRngs, AgentStore};

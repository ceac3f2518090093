//! Errors shared across the town crates.
//!
//! Sub-crates keep their own enums; `town-sim` wraps this one as
//! `SimError::Core`.

use thiserror::Error;

use crate::AgentId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} is not in the agent store")]
    AgentNotFound(AgentId),

    /// A `TownConfig` value out of range.
    #[error("invalid town config: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

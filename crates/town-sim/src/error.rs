use thiserror::Error;
use town_core::{AgentId, CoreError};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("town configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;

/// Why a claim on the reservation book was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReservationError {
    #[error("{0} cannot be paired with itself")]
    SameAgent(AgentId),

    #[error("{0} is already claimed")]
    Claimed(AgentId),

    #[error("{0} is not in the reservation book")]
    UnknownAgent(AgentId),
}

/// Misuse of the player input boundary.  Never fatal; the town is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteractionError {
    #[error("no agent with id {0}")]
    UnknownAgent(AgentId),

    #[error("{0} is the player and cannot be a conversation target")]
    TargetIsPlayer(AgentId),

    #[error("a player conversation is already in progress")]
    SessionActive,

    #[error("{0} is busy")]
    TargetBusy(AgentId),

    #[error("the player is busy")]
    PlayerBusy,

    #[error("no player conversation is in progress")]
    NoSession,

    #[error("it is not the player's turn to speak")]
    NotPlayerTurn,

    #[error("message is empty")]
    EmptyMessage,
}

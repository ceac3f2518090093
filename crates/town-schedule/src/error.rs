use thiserror::Error;

use town_core::AgentId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("tasks reference unknown resident {0}")]
    UnknownAgent(AgentId),

    #[error("resident {agent} is named {expected:?} but a task row says {found:?}")]
    NameMismatch { agent: AgentId, expected: String, found: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

//! Map-subsystem error type.

use thiserror::Error;

/// Errors produced by `town-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("location {0:?} is defined more than once")]
    DuplicateLocation(String),

    #[error("location parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MapResult<T> = Result<T, MapError>;

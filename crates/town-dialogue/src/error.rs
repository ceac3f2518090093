//! Error types for the dialogue adapter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogueError {
    /// The HTTP request could not be sent or its body not read.
    #[error("dialogue request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("dialogue service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response JSON did not contain the expected text field.
    #[error("malformed dialogue response: {0}")]
    MalformedResponse(String),

    #[error("dialogue request timed out after {0} ms")]
    Timeout(u64),

    /// No backend is configured; every request falls back.
    #[error("dialogue service is offline")]
    Offline,

    #[error("configuration error: {0}")]
    Config(String),
}

pub type DialogueResult<T> = Result<T, DialogueError>;

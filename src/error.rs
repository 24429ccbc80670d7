//! Typed errors for the decidr core.
//!
//! These carry structured reasons only. Turning them into messages for a
//! person is the presentation layer's job (see `cli::error::describe`).

use thiserror::Error;

/// Why an input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("task name is empty")]
    EmptyName,

    #[error("remaining time must be positive, got {0}")]
    NonPositiveDuration(i64),

    #[error("available time must be positive, got {0}")]
    NonPositiveBudget(i64),

    #[error("malformed deadline: {0}")]
    MalformedDeadline(String),

    #[error("malformed duration: {0}")]
    MalformedDuration(String),

    #[error("unknown suggestion mode: {0}")]
    UnknownMode(String),

    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    #[error("task id prefix '{0}' matches more than one task")]
    AmbiguousId(String),
}

/// Failures of the persistent store collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("storage failure")]
    Storage(#[from] StoreError),
}

impl Error {
    /// True for errors caused by what the user asked for, as opposed to
    /// failures of the storage underneath.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::NotFound(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

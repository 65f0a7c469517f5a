//! Unified error type surfaced by the runtime API.

use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("environment name must not be empty")]
    EmptyName,

    #[error("environment {0:?} is already registered")]
    DuplicateEnvironment(String),

    #[error("unknown environment handle {0}")]
    UnknownEnvironment(usize),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

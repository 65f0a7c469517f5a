//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by snapshot repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid slot name: {0:?}")]
    InvalidSlot(String),

    #[error("snapshot is not valid UTF-8: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

use thiserror::Error;

use crate::entity::NoteId;

#[derive(Error, Debug)]
pub enum StickyError {
    #[error("Not in a stickywall project. Run 'stickywall init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .stickywall/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by a key-value backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("quota exceeded: {required} bytes needed, limit is {limit}")]
    QuotaExceeded { limit: usize, required: usize },

    #[error("{0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StickyError>;

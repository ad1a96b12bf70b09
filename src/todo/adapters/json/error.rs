//! Error types for the JSON file store.

use crate::todo::ports::TodoRepositoryError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving, or locking the store file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another process holds the advisory lock beside the store.
    #[error("store is locked: {0}")]
    Locked(Utf8PathBuf),

    /// The store file failed structural parsing, version checks, or domain
    /// revalidation.
    #[error("corrupt store {path}: {reason}")]
    Corrupt {
        /// Store file path.
        path: Utf8PathBuf,
        /// What failed.
        reason: String,
    },

    /// The store path has no file name component.
    #[error("invalid store path: {0}")]
    InvalidPath(Utf8PathBuf),

    /// Filesystem failure.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be serialized.
    #[error("failed to serialize store document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl From<StoreError> for TodoRepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Locked(path) => Self::Locked(path.into_string()),
            StoreError::Corrupt { .. } => Self::CorruptData(err.to_string()),
            other => Self::persistence(other),
        }
    }
}

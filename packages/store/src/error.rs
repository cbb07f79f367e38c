use thiserror::Error;

/// Failure reported by a [`crate::KeyValueStore`] backend.
///
/// [`crate::TodoStore`] never propagates these; it logs them and degrades to
/// "no data" on reads or a dropped write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not a valid todo list: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

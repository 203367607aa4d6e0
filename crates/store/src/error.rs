//! Store error types.

use thiserror::Error;

/// Repository operation errors.
///
/// Absence is not an error: lookups return `Option` and deletes return
/// `bool`, so this enum only covers persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

//! Synthesis error types.

use thiserror::Error;

/// Synthesis operation errors.
///
/// Gateway calls only surface an error when the local fallback path itself
/// fails (e.g., the output path is unwritable); remote failures degrade to
/// placeholder rendering instead of propagating.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("remote synthesis error: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("remote synthesis protocol error: {0}")]
    Protocol(String),

    #[error("generation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = std::result::Result<T, SynthesisError>;

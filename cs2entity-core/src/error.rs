//! Error types for reading and writing model files

use thiserror::Error;

/// Result type for model I/O
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a CraftStudio model or writing an entity model.
///
/// Conversion itself never fails; these only come from the JSON collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed JSON, a missing field or an array of the wrong length
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the underlying stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for content loading.

use thiserror::Error;

/// Result type for content loading.
pub type Result<T> = std::result::Result<T, ContentLoadError>;

/// Errors raised while reading content documents or snapshots.
///
/// Normalization itself never fails; these cover only input that cannot be
/// read or has the wrong overall shape.
#[derive(Error, Debug)]
pub enum ContentLoadError {
    /// File could not be read
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON that does not match the normalized snapshot schema
    #[error("Invalid snapshot at `{path}`: {message}")]
    Snapshot { path: String, message: String },

    /// Valid JSON with an unusable top-level shape
    #[error("Unexpected document shape: {0}")]
    Shape(String),
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ContentLoadError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        ContentLoadError::Snapshot {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        }
    }
}

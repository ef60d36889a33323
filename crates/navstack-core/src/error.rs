//! Error types for the document model.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the document model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required link field was absent or empty on insert.
    #[error("required field missing or empty: {0}")]
    MissingField(&'static str),

    /// The document text is not well-formed YAML.
    #[error("document parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Notification state could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error types for the document store adapter.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur talking to the remote document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document does not exist in the store.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The write was rejected because the revision token is stale.
    #[error("write conflict on {0}: stale revision")]
    Conflict(String),

    /// The store answered with an unexpected status.
    #[error("upstream error on {path}: status {status}")]
    Upstream { status: u16, path: String },

    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

//! Error types for the restaurant service.

use qeats_search::SearchError;

/// Top-level error type for the restaurant service.
#[derive(Debug, thiserror::Error)]
pub enum QeatsError {
    /// The request failed validation (coordinates out of range, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Search aggregation error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, QeatsError>;

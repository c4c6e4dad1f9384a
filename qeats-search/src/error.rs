//! Error types for the qeats-search crate.
//!
//! All errors carry stable string messages suitable for logging and
//! programmatic matching.

/// Errors that can occur while aggregating restaurant searches.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A restaurant source (the finder collaborator) failed a lookup.
    #[error("source error: {0}")]
    Source(String),

    /// A lookup did not complete within the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// The caller abandoned the request before the lookups completed.
    #[error("search cancelled: {0}")]
    Cancelled(String),

    /// A spawned lookup task panicked or was aborted.
    #[error("task error: {0}")]
    Task(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for qeats-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

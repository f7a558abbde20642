//! Typed errors for the vetting library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Note that most of the
//! sanitize/validate core never returns errors at all: malformed model
//! output degrades to the sentinel result instead (see `sanitize`).

use thiserror::Error;

/// Errors that can occur during vetting operations.
#[derive(Debug, Error)]
pub enum VettingError {
    /// Upstream client call failed
    #[error("client error: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error (missing credentials, bad paths)
    #[error("config error: {0}")]
    Config(String),

    /// Input/output file handling failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for vetting operations.
pub type Result<T> = std::result::Result<T, VettingError>;

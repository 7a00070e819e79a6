//! Error types for probe operations

use thiserror::Error;

/// Result type alias for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving the probe
///
/// None of these escape to the UI layer: every one ends as a log line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Connect was requested while a connection is already open
    #[error("Already connected")]
    AlreadyConnected,

    /// The transport could not be constructed for this endpoint
    #[error("invalid endpoint {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A control request failed (network or body read)
    #[error("{path}: {reason}")]
    Http { path: String, reason: String },

    /// Startup configuration is unusable
    #[error("config error: {0}")]
    Config(String),

    /// REPL input could not be understood
    #[error("{0}")]
    Usage(String),
}

impl ProbeError {
    pub fn http(path: &str, reason: impl ToString) -> Self {
        ProbeError::Http {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

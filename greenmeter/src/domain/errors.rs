//! Structured error types for greenmeter
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

/// Everything that can go wrong while turning one poll cycle into a number.
///
/// None of these are fatal: the poller logs them and shows the grey state.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("PROMETHEUS_URL environment variable is not set")]
    MissingEndpoint,

    #[error("Failed to create metrics client for {endpoint}: {reason}")]
    ClientBuild { endpoint: String, reason: String },

    #[error("Error querying Prometheus: {0}")]
    Query(#[from] reqwest::Error),

    #[error("Prometheus returned {error_type}: {message}")]
    Api { error_type: String, message: String },

    #[error("Expected an instant vector, got {0}")]
    UnexpectedResultType(String),

    #[error("no data returned")]
    NoData,

    #[error("Sample value is not a number: {0}")]
    InvalidSample(String),

    #[error("Error formatting metric {0}")]
    Format(f64),
}

impl FetchError {
    /// True when the failure comes from local configuration rather than the backend
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, FetchError::MissingEndpoint | FetchError::ClientBuild { .. })
    }
}

#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//! Muninn error types

/// Muninn error types
#[derive(Debug, thiserror::Error)]
pub enum MuninnError {
    // Startup errors
    /// The startup health probe failed. Fatal to the session; the only way
    /// out is an explicit restart.
    #[error("cannot reach extraction service: {0}")]
    Connectivity(String),

    // Transport errors
    #[error("processing is taking longer than expected, please retry")]
    Timeout {
        /// Which client operation hit its tier bound.
        operation: &'static str,
    },

    #[error("network error: {0}")]
    Network(String),

    /// Service reachable but returned an error status. `message` carries the
    /// server-supplied detail when present, a generic fallback otherwise.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected before any network call (empty submission, double submit,
    /// navigation during an in-flight submission).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Export errors
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl MuninnError {
    /// Whether the session can recover from this error in place.
    ///
    /// Recoverable errors keep the user on the current view with a message;
    /// `Connectivity` is session-fatal and requires a full restart.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MuninnError::Connectivity(_))
    }

    /// The operation name for timeout errors, if this is one.
    pub fn timed_out_operation(&self) -> Option<&'static str> {
        match self {
            MuninnError::Timeout { operation } => Some(operation),
            _ => None,
        }
    }
}

/// Result type alias for muninn operations
pub type Result<T> = std::result::Result<T, MuninnError>;

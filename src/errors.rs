//! Error types for WisdomPath
//!
//! Nearly every flow operation is total. The domain failures are removing a
//! list entry by an index that does not exist and answering a quiz question
//! that is not in the bank; the remaining variants cover the configuration,
//! script and I/O plumbing around the flows.

use thiserror::Error;

/// Main error type for the WisdomPath flow engine
#[derive(Error, Debug)]
pub enum WisdomError {
    /// List removal with an index outside `[0, len)`
    #[error("Index {index} out of range for {field} (length {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    /// Quiz answer for a question id outside the question bank
    #[error("Unknown quiz question: {0}")]
    UnknownQuestion(String),

    /// Flow script could not be interpreted
    #[error("Invalid flow script: {0}")]
    InvalidScript(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("WisdomPath error: {0}")]
    Generic(String),
}

/// Result type alias for flow operations
pub type Result<T> = std::result::Result<T, WisdomError>;

/// Convert anyhow errors to WisdomError
impl From<anyhow::Error> for WisdomError {
    fn from(err: anyhow::Error) -> Self {
        WisdomError::Generic(err.to_string())
    }
}

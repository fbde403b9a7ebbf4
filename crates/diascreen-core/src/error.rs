//! Error types for DiaScreen

/// Result type alias using DiaScreen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for DiaScreen operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Artifact acquisition failures: unreachable source, missing file,
    /// or an undecodable artifact. Fatal at startup.
    #[error("acquisition error: {0}")]
    Acquisition(String),

    /// Input rejected by the range validator
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failure while shaping input or invoking the model
    #[error("inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new acquisition error
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// A request field that failed range validation.
///
/// Carries the offending field's name and the constraint message shown to
/// the caller. The message text is part of the form endpoint's contract
/// and is returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the field that failed validation
    pub field: &'static str,

    /// Human-readable constraint message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error for a named field
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

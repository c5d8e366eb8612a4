//! Error types for format operations

/// Errors that can occur while converting between formats
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// A tag option that must have a strict type could not be parsed
    #[error("Invalid value '{value}' for option '{option}' of tag [{tag}]: {reason}")]
    Format {
        tag: String,
        option: String,
        value: String,
        reason: String,
    },

    /// The sanitizer rejected its configuration
    #[error("Sanitizer configuration rejected: {0}")]
    Sanitization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for addon-sigview.
//!
//! Only the outer boundaries (byte source, inspector, configuration, sinks)
//! can fail. The normalization, classification and presentation stages are
//! total and never produce one of these.

use thiserror::Error;

/// Main error type for addon-sigview operations.
#[derive(Debug, Error)]
pub enum SigviewError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The user dismissed the picker without choosing a file
    #[error("No file chosen")]
    NoFileChosen,

    /// The inspector could not make sense of the input at all
    #[error("Not an add-on archive: {0}")]
    NotAnArchive(String),

    /// Byte read timeout
    #[error("Read timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// Resource limit exceeded
    #[error("Resource limit exceeded: {resource} ({used}/{limit})")]
    ResourceExhausted {
        resource: String,
        used: u64,
        limit: u64,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rendering sink could not write its output
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias for addon-sigview operations
pub type Result<T> = std::result::Result<T, SigviewError>;

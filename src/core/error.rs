//! Error types for the logging facility
//!
//! Construction-time configuration problems are the only errors callers ever
//! see; everything that happens after a provider is running is handled
//! internally (retried or swallowed) so logging can never raise into the
//! caller's control flow.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File provider error with path context
    #[error("File provider error for '{path}': {message}")]
    FileProvider { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    Writer(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file provider error
    pub fn file_provider(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileProvider {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }
}

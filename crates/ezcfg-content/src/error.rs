//! Error types for ezcfg-content

/// Result type for ezcfg-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ezcfg-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("Cannot set path {path}: {reason}")]
    PathSetFailed { path: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn path_set(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PathSetFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

//! Error types for ezcfg-core

/// Result type for ezcfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole load, save or copy call
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Locator, bootstrap or storage error from ezcfg-fs
    #[error(transparent)]
    Fs(#[from] ezcfg_fs::Error),

    /// Malformed document or render error from ezcfg-content
    #[error(transparent)]
    Content(#[from] ezcfg_content::Error),
}

/// A failure confined to one field.
///
/// These are reported through the sync hooks and collected in the
/// [`SyncReport`](crate::SyncReport); the remaining fields still synchronize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Field {owner}::{field} has unsupported type {declared}; declare an explicit type")]
    UnsupportedType {
        owner: &'static str,
        field: &'static str,
        declared: String,
    },

    #[error("Could not read field {field} for {path}: {message}")]
    Read {
        field: &'static str,
        path: String,
        message: String,
    },

    #[error("Could not set field {field} from {path}: {message}")]
    Write {
        field: &'static str,
        path: String,
        message: String,
    },

    #[error("Could not write {path} for field {field}: {message}")]
    Document {
        field: &'static str,
        path: String,
        message: String,
    },

    #[error("Could not copy field {field}: {message}")]
    Copy {
        field: &'static str,
        message: String,
    },
}

impl FieldError {
    /// Name of the field the error is about
    pub fn field(&self) -> &'static str {
        match self {
            Self::UnsupportedType { field, .. }
            | Self::Read { field, .. }
            | Self::Write { field, .. }
            | Self::Document { field, .. }
            | Self::Copy { field, .. } => field,
        }
    }
}

/// Failure of a registered field accessor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AccessError {
    message: String,
}

impl AccessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

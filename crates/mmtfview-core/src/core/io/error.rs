use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Gzip decompression failed: {0}")]
    Decompression(io::Error),

    #[error("MessagePack error at byte {offset}: {message}")]
    MessagePack { offset: u64, message: String },

    #[error("Container root must be a map, found {0}")]
    RootNotMap(&'static str),

    #[error("Map keys must be strings, found {0}")]
    NonStringKey(&'static str),
}

/// A container field is absent or does not have the expected shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Missing required field '{0}'")]
    Missing(String),

    #[error("Invalid field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl FieldError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

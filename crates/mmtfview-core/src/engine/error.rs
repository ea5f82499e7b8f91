use thiserror::Error;

use crate::core::codec::CodecError;
use crate::core::io::FieldError;
use crate::core::models::EntityMapError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("Missing required field '{0}'")]
    MissingField(String),

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Failed to decode column '{field}': {source}")]
    Codec {
        field: &'static str,
        #[source]
        source: CodecError,
    },

    #[error("Index {index} is out of range for {count} models")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Inconsistent hierarchy: {0}")]
    IndexConsistency(String),

    #[error("Column '{field}' has {found} elements but {expected} are required")]
    ColumnLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

impl StructureError {
    pub(crate) fn codec(field: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| Self::Codec { field, source }
    }
}

impl From<FieldError> for StructureError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Missing(name) => Self::MissingField(name),
            FieldError::Invalid { field, reason } => Self::InvalidField { field, reason },
        }
    }
}

impl From<EntityMapError> for StructureError {
    fn from(err: EntityMapError) -> Self {
        Self::IndexConsistency(err.to_string())
    }
}

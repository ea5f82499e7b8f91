use super::column::{CodecError, ColumnHeader, EncodedColumn, TypedArray};
use std::fmt::Debug;

/// Defines the interface for turning encoded columns into typed arrays.
///
/// Implementors own the byte-level encoding rules; callers only ever see
/// [`TypedArray`] values and header metadata. The trait is object safe so a
/// structure can hold any codec behind an `Arc<dyn ColumnCodec>`.
pub trait ColumnCodec: Debug + Send + Sync {
    /// Decodes a column according to the strategy recorded in its header.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownStrategy`] for an unrecognized strategy id and
    /// [`CodecError::LengthMismatch`] when the decoded element count disagrees
    /// with the count declared in the header.
    fn decode(&self, column: &EncodedColumn) -> Result<TypedArray, CodecError>;

    /// Reads the header of a column without touching its payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is shorter than a header or the header
    /// carries a negative element count.
    fn peek_header(&self, column: &EncodedColumn) -> Result<ColumnHeader, CodecError>;
}

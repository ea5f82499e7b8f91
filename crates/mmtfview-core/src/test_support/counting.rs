//! A codec wrapper that counts how often each entry point is used.

use crate::core::codec::{CodecError, ColumnCodec, ColumnHeader, EncodedColumn, MmtfCodec, TypedArray};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub(crate) struct CountingCodec {
    inner: MmtfCodec,
    decodes: AtomicUsize,
    peeks: AtomicUsize,
}

impl CountingCodec {
    pub fn decodes(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }

    pub fn peeks(&self) -> usize {
        self.peeks.load(Ordering::SeqCst)
    }
}

impl ColumnCodec for CountingCodec {
    fn decode(&self, column: &EncodedColumn) -> Result<TypedArray, CodecError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        self.inner.decode(column)
    }

    fn peek_header(&self, column: &EncodedColumn) -> Result<ColumnHeader, CodecError> {
        self.peeks.fetch_add(1, Ordering::SeqCst);
        self.inner.peek_header(column)
    }
}

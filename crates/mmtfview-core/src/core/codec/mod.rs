//! Column codecs.
//!
//! Encoded columns arrive from the container as opaque byte buffers with a
//! small fixed header. This module defines the [`traits::ColumnCodec`] seam used
//! by the rest of the crate, the value types that cross it, and
//! [`mmtf::MmtfCodec`], the implementation for the MMTF binary strategies.
//!
//! The codec is deliberately narrow: it knows nothing about atoms, groups or
//! chains. Mapping decoded arrays onto the structural hierarchy is the job of
//! [`crate::engine`].

pub mod column;
pub mod mmtf;
mod primitives;
pub mod traits;

pub use column::{CodecError, ColumnHeader, EncodedColumn, TypedArray};
pub use mmtf::MmtfCodec;
pub use traits::ColumnCodec;

//! # Core Module
//!
//! Stateless building blocks for reading macromolecular structure containers.
//!
//! ## Overview
//!
//! Nothing in this module knows about offset tables or lazy materialization.
//! It turns bytes into typed values and typed values into small records; the
//! stateful decoding of a whole structure lives in [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Column Codecs** ([`codec`]) - The [`codec::ColumnCodec`] seam and the MMTF binary strategies
//! - **Container I/O** ([`io`]) - MessagePack deserialization, gzip detection and typed field access
//! - **Records** ([`models`]) - Residue-type catalog, entities, metadata and bonds
//!
//! ## Data Flow
//!
//! A raw file is read by [`io::MmtfFile`] into an [`io::Container`]. Encoded
//! columns are pulled out of the container as [`codec::EncodedColumn`] values
//! and handed to a codec only when an attribute is first requested, while the
//! small list-of-records fields (catalog, entity list, assemblies) are parsed
//! eagerly into [`models`] types.

pub mod codec;
pub mod io;
pub mod models;

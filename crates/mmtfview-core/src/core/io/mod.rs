//! Reading structure containers.
//!
//! A container is the deserialized key/value record of one structure. This
//! module provides the dynamically typed [`container::Container`], a
//! MessagePack reader producing it, and [`mmtf::MmtfFile`], which adds gzip
//! detection and file access through the [`traits::ContainerFile`] trait.

pub mod container;
pub mod error;
pub mod mmtf;
pub mod msgpack;
pub mod traits;

pub use container::{Container, FieldValue, keys};
pub use error::{ContainerError, FieldError};
pub use mmtf::MmtfFile;
pub use traits::ContainerFile;

use crate::core::io::{ContainerError, ContainerFile, MmtfFile};
use crate::engine::{DecodeOptions, Structure, StructureError};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read container: {0}")]
    Container(#[from] ContainerError),

    #[error("Failed to build structure: {0}")]
    Structure(#[from] StructureError),
}

/// Reads an MMTF file, plain or gzip-compressed, and builds a structure from it.
#[instrument(skip_all, name = "decode_file")]
pub fn decode_file(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Structure, DecodeError> {
    let path = path.as_ref();
    info!(path = %path.display(), first_model_only = options.first_model_only, "Decoding structure file.");
    let container = MmtfFile::read_from_path(path)?;
    Ok(Structure::from_container(&container, options)?)
}

/// Builds a structure from an in-memory MMTF buffer.
#[instrument(skip_all, name = "decode_bytes", fields(len = bytes.len()))]
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Structure, DecodeError> {
    let container = MmtfFile::read_from_bytes(bytes)?;
    Ok(Structure::from_container(&container, options)?)
}

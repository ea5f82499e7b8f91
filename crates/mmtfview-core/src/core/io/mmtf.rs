use super::container::Container;
use super::error::ContainerError;
use super::msgpack::decode_container;
use super::traits::ContainerFile;
use flate2::read::GzDecoder;
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reader for MMTF files: a MessagePack map, optionally gzip-compressed.
pub struct MmtfFile;

impl ContainerFile for MmtfFile {
    type Error = ContainerError;

    fn read_from_bytes(bytes: &[u8]) -> Result<Container, Self::Error> {
        if bytes.starts_with(&GZIP_MAGIC) {
            let mut decoder = GzDecoder::new(bytes);
            let mut inflated = Vec::new();
            decoder
                .read_to_end(&mut inflated)
                .map_err(ContainerError::Decompression)?;
            decode_container(&inflated)
        } else {
            decode_container(bytes)
        }
    }
}

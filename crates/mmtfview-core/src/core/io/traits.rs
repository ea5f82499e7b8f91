use super::container::Container;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Defines the interface for reading a serialized structure container.
///
/// Implementors handle the outer serialization (compression, map encoding)
/// and hand back the key/value [`Container`]; the encoded columns inside it
/// are left untouched for the structure decoder.
pub trait ContainerFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a container from an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not a valid serialized container.
    fn read_from_bytes(bytes: &[u8]) -> Result<Container, Self::Error>;

    /// Reads a container from a reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The reader to consume until end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content cannot be decoded.
    fn read_from(reader: &mut impl Read) -> Result<Container, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::read_from_bytes(&bytes)
    }

    /// Reads a container from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoding fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Container, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

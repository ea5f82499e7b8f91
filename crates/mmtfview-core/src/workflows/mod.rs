//! End-to-end operations built on the engine: decoding a file or buffer into a
//! [`Structure`](crate::engine::Structure) and summarizing the result.

pub mod decode;
pub mod summary;

pub use decode::{DecodeError, decode_bytes, decode_file};
pub use summary::{EntitySummary, StructureSummary, summarize};

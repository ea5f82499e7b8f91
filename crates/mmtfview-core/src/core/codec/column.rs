use thiserror::Error;

/// Size in bytes of the fixed header that precedes every encoded column payload.
pub const HEADER_LEN: usize = 12;

/// Payload length of a column consisting of exactly one run-length pair.
const SINGLE_RUN_PAYLOAD_LEN: usize = 8;

/// An encoded column exactly as delivered by the container.
///
/// The buffer starts with a [`HEADER_LEN`]-byte header (strategy id, declared
/// element count, strategy parameter, all big-endian `i32`) followed by the
/// strategy-specific payload. The column is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedColumn {
    bytes: Vec<u8>,
}

impl EncodedColumn {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes following the header, or an empty slice for a truncated buffer.
    pub fn payload(&self) -> &[u8] {
        self.bytes.get(HEADER_LEN..).unwrap_or(&[])
    }
}

impl From<Vec<u8>> for EncodedColumn {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Header metadata of an encoded column, obtained without decoding the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHeader {
    /// Identifier of the encoding strategy.
    pub strategy: i32,
    /// Number of elements the decoded array must contain.
    pub length: usize,
    /// Strategy parameter (string width, fixed-point divisor, ...).
    pub parameter: i32,
    /// Number of payload bytes after the header.
    pub payload_len: usize,
}

impl ColumnHeader {
    /// Whether the payload is a single parameter-less run-length pair.
    ///
    /// For character columns this is how a container spells "every value is
    /// the default", which lets callers skip the decode entirely.
    pub fn is_single_run(&self) -> bool {
        self.payload_len == SINGLE_RUN_PAYLOAD_LEN && self.parameter == 0
    }
}

/// A fully decoded column.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    /// Single characters; `None` marks the container's "no value" code.
    Chars(Vec<Option<char>>),
    Strings(Vec<String>),
}

impl TypedArray {
    pub fn len(&self) -> usize {
        match self {
            Self::Int32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Chars(v) => v.len(),
            Self::Strings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int32(_) => "int32",
            Self::Float32(_) => "float32",
            Self::Chars(_) => "chars",
            Self::Strings(_) => "strings",
        }
    }

    pub fn into_i32s(self) -> Result<Vec<i32>, CodecError> {
        match self {
            Self::Int32(v) => Ok(v),
            other => Err(CodecError::TypeMismatch {
                expected: "int32",
                found: other.kind(),
            }),
        }
    }

    /// Returns the values as floats; integer columns are widened.
    pub fn into_f32s(self) -> Result<Vec<f32>, CodecError> {
        match self {
            Self::Float32(v) => Ok(v),
            Self::Int32(v) => Ok(v.into_iter().map(|x| x as f32).collect()),
            other => Err(CodecError::TypeMismatch {
                expected: "float32",
                found: other.kind(),
            }),
        }
    }

    pub fn into_chars(self) -> Result<Vec<Option<char>>, CodecError> {
        match self {
            Self::Chars(v) => Ok(v),
            other => Err(CodecError::TypeMismatch {
                expected: "chars",
                found: other.kind(),
            }),
        }
    }

    pub fn into_strings(self) -> Result<Vec<String>, CodecError> {
        match self {
            Self::Strings(v) => Ok(v),
            other => Err(CodecError::TypeMismatch {
                expected: "strings",
                found: other.kind(),
            }),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Encoded column is {len} bytes long, shorter than the {HEADER_LEN}-byte header")]
    TruncatedHeader { len: usize },

    #[error("Invalid column header: {0}")]
    InvalidHeader(String),

    #[error("Unknown encoding strategy {0}")]
    UnknownStrategy(i32),

    #[error("Decoded {decoded} elements but the header declares {declared}")]
    LengthMismatch { declared: usize, decoded: usize },

    #[error("Malformed payload for {}: {reason}", strategy_label(.strategy))]
    MalformedPayload { strategy: i32, reason: String },

    #[error("Expected a {expected} column but decoded {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

fn strategy_label(strategy: &i32) -> String {
    match super::mmtf::strategy_name(*strategy) {
        Some(name) => format!("strategy {strategy} ({name})"),
        None => format!("strategy {strategy}"),
    }
}

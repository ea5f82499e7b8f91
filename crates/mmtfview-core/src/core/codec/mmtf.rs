use super::column::{CodecError, ColumnHeader, EncodedColumn, HEADER_LEN, TypedArray};
use super::primitives::{
    delta, divide, read_f32s, read_fixed_strings, read_i8s, read_i16s, read_i32s,
    recursive_index, run_length,
};
use super::traits::ColumnCodec;
use phf::{Map, phf_map};

static STRATEGY_NAMES: Map<i32, &'static str> = phf_map! {
    1i32 => "float32",
    2i32 => "int8",
    3i32 => "int16",
    4i32 => "int32",
    5i32 => "fixed-width string",
    6i32 => "run-length char",
    7i32 => "run-length int32",
    8i32 => "run-length delta int32",
    9i32 => "run-length fixed-point float",
    10i32 => "recursive-index delta fixed-point float (int16)",
    11i32 => "fixed-point float (int16)",
    12i32 => "recursive-index fixed-point float (int16)",
    13i32 => "recursive-index fixed-point float (int8)",
    14i32 => "recursive-index int32 (int16)",
    15i32 => "recursive-index int32 (int8)",
};

/// Human-readable name of a strategy id, if the codec knows it.
pub fn strategy_name(strategy: i32) -> Option<&'static str> {
    STRATEGY_NAMES.get(&strategy).copied()
}

/// Codec for the MMTF binary column layout (strategies 1 through 15).
#[derive(Debug, Clone, Copy, Default)]
pub struct MmtfCodec;

impl MmtfCodec {
    pub fn new() -> Self {
        Self
    }

    fn decode_payload(&self, header: &ColumnHeader, payload: &[u8]) -> Result<TypedArray, CodecError> {
        let strategy = header.strategy;
        let param = header.parameter;
        let declared = header.length;
        let i16_min = i16::MIN as i32;
        let i16_max = i16::MAX as i32;
        let i8_min = i8::MIN as i32;
        let i8_max = i8::MAX as i32;

        let array = match strategy {
            1 => TypedArray::Float32(read_f32s(strategy, payload)?),
            2 => TypedArray::Int32(read_i8s(payload)),
            3 => TypedArray::Int32(read_i16s(strategy, payload)?),
            4 => TypedArray::Int32(read_i32s(strategy, payload)?),
            5 => TypedArray::Strings(read_fixed_strings(strategy, payload, param)?),
            6 => {
                let codes = run_length(strategy, &read_i32s(strategy, payload)?, declared)?;
                TypedArray::Chars(
                    codes
                        .into_iter()
                        .map(|code| match code {
                            0 => Ok(None),
                            c => u32::try_from(c)
                                .ok()
                                .and_then(char::from_u32)
                                .map(Some)
                                .ok_or_else(|| CodecError::MalformedPayload {
                                    strategy,
                                    reason: format!("invalid character code {c}"),
                                }),
                        })
                        .collect::<Result<_, _>>()?,
                )
            }
            7 => TypedArray::Int32(run_length(strategy, &read_i32s(strategy, payload)?, declared)?),
            8 => TypedArray::Int32(delta(run_length(
                strategy,
                &read_i32s(strategy, payload)?,
                declared,
            )?)),
            9 => {
                let ints = run_length(strategy, &read_i32s(strategy, payload)?, declared)?;
                TypedArray::Float32(divide(strategy, &ints, param)?)
            }
            10 => {
                let packed = read_i16s(strategy, payload)?;
                let ints = delta(recursive_index(&packed, i16_min, i16_max));
                TypedArray::Float32(divide(strategy, &ints, param)?)
            }
            11 => TypedArray::Float32(divide(strategy, &read_i16s(strategy, payload)?, param)?),
            12 => {
                let packed = read_i16s(strategy, payload)?;
                let ints = recursive_index(&packed, i16_min, i16_max);
                TypedArray::Float32(divide(strategy, &ints, param)?)
            }
            13 => {
                let ints = recursive_index(&read_i8s(payload), i8_min, i8_max);
                TypedArray::Float32(divide(strategy, &ints, param)?)
            }
            14 => TypedArray::Int32(recursive_index(
                &read_i16s(strategy, payload)?,
                i16_min,
                i16_max,
            )),
            15 => TypedArray::Int32(recursive_index(&read_i8s(payload), i8_min, i8_max)),
            other => return Err(CodecError::UnknownStrategy(other)),
        };
        Ok(array)
    }
}

impl ColumnCodec for MmtfCodec {
    fn decode(&self, column: &EncodedColumn) -> Result<TypedArray, CodecError> {
        let header = self.peek_header(column)?;
        let array = self.decode_payload(&header, column.payload())?;
        if array.len() != header.length {
            return Err(CodecError::LengthMismatch {
                declared: header.length,
                decoded: array.len(),
            });
        }
        Ok(array)
    }

    fn peek_header(&self, column: &EncodedColumn) -> Result<ColumnHeader, CodecError> {
        let bytes = column.as_bytes();
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::TruncatedHeader { len: bytes.len() });
        }
        let word = |i: usize| i32::from_be_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        let strategy = word(0);
        let length = usize::try_from(word(4)).map_err(|_| {
            CodecError::InvalidHeader(format!("negative element count {}", word(4)))
        })?;
        Ok(ColumnHeader {
            strategy,
            length,
            parameter: word(8),
            payload_len: bytes.len() - HEADER_LEN,
        })
    }
}

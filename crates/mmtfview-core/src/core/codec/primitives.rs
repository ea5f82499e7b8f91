//! Byte-level building blocks shared by the column strategies.
//!
//! All multi-byte values in the payload are big-endian.

use super::column::CodecError;

fn check_width(strategy: i32, bytes: &[u8], width: usize) -> Result<(), CodecError> {
    if bytes.len() % width != 0 {
        return Err(CodecError::MalformedPayload {
            strategy,
            reason: format!(
                "payload of {} bytes is not a multiple of {width}",
                bytes.len()
            ),
        });
    }
    Ok(())
}

pub(crate) fn read_i8s(bytes: &[u8]) -> Vec<i32> {
    bytes.iter().map(|&b| b as i8 as i32).collect()
}

pub(crate) fn read_i16s(strategy: i32, bytes: &[u8]) -> Result<Vec<i32>, CodecError> {
    check_width(strategy, bytes, 2)?;
    Ok(bytes
        .chunks_exact(2)
        .map(|c| i16::from_be_bytes([c[0], c[1]]) as i32)
        .collect())
}

pub(crate) fn read_i32s(strategy: i32, bytes: &[u8]) -> Result<Vec<i32>, CodecError> {
    check_width(strategy, bytes, 4)?;
    Ok(bytes
        .chunks_exact(4)
        .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

pub(crate) fn read_f32s(strategy: i32, bytes: &[u8]) -> Result<Vec<f32>, CodecError> {
    check_width(strategy, bytes, 4)?;
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Splits the payload into NUL-padded strings of `width` bytes each.
pub(crate) fn read_fixed_strings(
    strategy: i32,
    bytes: &[u8],
    width: i32,
) -> Result<Vec<String>, CodecError> {
    let width = usize::try_from(width)
        .ok()
        .filter(|&w| w > 0)
        .ok_or_else(|| CodecError::MalformedPayload {
            strategy,
            reason: format!("string width must be positive, got {width}"),
        })?;
    check_width(strategy, bytes, width)?;
    bytes
        .chunks_exact(width)
        .map(|chunk| {
            let end = chunk.iter().position(|&b| b == 0).unwrap_or(chunk.len());
            String::from_utf8(chunk[..end].to_vec()).map_err(|e| CodecError::MalformedPayload {
                strategy,
                reason: format!("string is not valid UTF-8: {e}"),
            })
        })
        .collect()
}

/// Expands `(value, count)` pairs into a flat array of at most `declared` elements.
///
/// Fails with [`CodecError::LengthMismatch`] as soon as the runs add up to more
/// than `declared`, before anything beyond it is allocated.
pub(crate) fn run_length(
    strategy: i32,
    pairs: &[i32],
    declared: usize,
) -> Result<Vec<i32>, CodecError> {
    if pairs.len() % 2 != 0 {
        return Err(CodecError::MalformedPayload {
            strategy,
            reason: "run-length array length must be even".into(),
        });
    }
    let mut out = Vec::new();
    let mut total = 0usize;
    for pair in pairs.chunks_exact(2) {
        let count = usize::try_from(pair[1]).map_err(|_| CodecError::MalformedPayload {
            strategy,
            reason: format!("negative run length {}", pair[1]),
        })?;
        total = total.saturating_add(count);
        if total > declared {
            return Err(CodecError::LengthMismatch {
                declared,
                decoded: total,
            });
        }
        out.extend(std::iter::repeat_n(pair[0], count));
    }
    Ok(out)
}

/// Replaces each value with the running sum of the values before and including it.
pub(crate) fn delta(mut values: Vec<i32>) -> Vec<i32> {
    for i in 1..values.len() {
        values[i] = values[i].wrapping_add(values[i - 1]);
    }
    values
}

/// Undoes recursive-index packing: values sitting at the packed type's limit are
/// accumulated until a value strictly inside the range completes the element.
pub(crate) fn recursive_index(packed: &[i32], min: i32, max: i32) -> Vec<i32> {
    let mut out = Vec::with_capacity(packed.len());
    let mut acc = 0i32;
    for &value in packed {
        acc = acc.wrapping_add(value);
        if value != max && value != min {
            out.push(acc);
            acc = 0;
        }
    }
    out
}

/// Divides integers by a fixed-point divisor.
pub(crate) fn divide(strategy: i32, values: &[i32], divisor: i32) -> Result<Vec<f32>, CodecError> {
    if divisor == 0 {
        return Err(CodecError::MalformedPayload {
            strategy,
            reason: "fixed-point divisor is zero".into(),
        });
    }
    let divisor = divisor as f32;
    Ok(values.iter().map(|&v| v as f32 / divisor).collect())
}

//! Encoders producing columns in the MMTF binary layout.

use crate::core::codec::EncodedColumn;

pub(crate) fn raw_column(strategy: i32, length: i32, parameter: i32, payload: &[u8]) -> EncodedColumn {
    let mut bytes = Vec::with_capacity(12 + payload.len());
    bytes.extend_from_slice(&strategy.to_be_bytes());
    bytes.extend_from_slice(&length.to_be_bytes());
    bytes.extend_from_slice(&parameter.to_be_bytes());
    bytes.extend_from_slice(payload);
    EncodedColumn::new(bytes)
}

fn words(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn runs(values: &[i32]) -> Vec<i32> {
    let mut pairs: Vec<i32> = Vec::new();
    for &value in values {
        match pairs.len() {
            n if n >= 2 && pairs[n - 2] == value => pairs[n - 1] += 1,
            _ => pairs.extend([value, 1]),
        }
    }
    pairs
}

pub(crate) fn int_column(values: &[i32]) -> EncodedColumn {
    raw_column(4, values.len() as i32, 0, &words(values))
}

pub(crate) fn float_column(values: &[f32]) -> EncodedColumn {
    let payload: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    raw_column(1, values.len() as i32, 0, &payload)
}

pub(crate) fn run_length_column(values: &[i32]) -> EncodedColumn {
    raw_column(7, values.len() as i32, 0, &words(&runs(values)))
}

pub(crate) fn char_column(values: &[Option<char>]) -> EncodedColumn {
    let codes: Vec<i32> = values.iter().map(|c| c.map_or(0, |c| c as i32)).collect();
    raw_column(6, values.len() as i32, 0, &words(&runs(&codes)))
}

pub(crate) fn string_column(values: &[&str], width: usize) -> EncodedColumn {
    let mut payload = Vec::with_capacity(values.len() * width);
    for value in values {
        let mut cell = value.as_bytes().to_vec();
        cell.resize(width, 0);
        payload.extend(cell);
    }
    raw_column(5, values.len() as i32, width as i32, &payload)
}

/// Encodes floats with strategy 10 (fixed point, delta, 16-bit recursive index).
pub(crate) fn fixed_point_column(values: &[f32], divisor: i32) -> EncodedColumn {
    let ints: Vec<i32> = values
        .iter()
        .map(|v| (v * divisor as f32).round() as i32)
        .collect();
    let (min, max) = (i16::MIN as i32, i16::MAX as i32);
    let mut packed: Vec<i16> = Vec::new();
    let mut previous = 0;
    for value in ints {
        let mut d = value - previous;
        previous = value;
        if d >= 0 {
            while d >= max {
                packed.push(i16::MAX);
                d -= max;
            }
        } else {
            while d <= min {
                packed.push(i16::MIN);
                d -= min;
            }
        }
        packed.push(d as i16);
    }
    let payload: Vec<u8> = packed.iter().flat_map(|v| v.to_be_bytes()).collect();
    raw_column(10, values.len() as i32, divisor, &payload)
}

//! A MessagePack reader producing [`FieldValue`] trees.
//!
//! Only the subset of MessagePack used by structure containers is supported:
//! extension types are rejected.

use super::container::{Container, FieldValue};
use super::error::ContainerError;
use rmp::Marker;
use std::io::{Cursor, Read};

type Reader<'a> = Cursor<&'a [u8]>;

/// Decodes a MessagePack document whose root is a string-keyed map.
pub fn decode_container(data: &[u8]) -> Result<Container, ContainerError> {
    match decode_value(data)? {
        FieldValue::Map(pairs) => Ok(pairs.into_iter().collect()),
        other => Err(ContainerError::RootNotMap(other.kind())),
    }
}

/// Decodes a single MessagePack value.
pub fn decode_value(data: &[u8]) -> Result<FieldValue, ContainerError> {
    let mut cursor = Cursor::new(data);
    read_value(&mut cursor)
}

fn error(rd: &Reader<'_>, message: impl Into<String>) -> ContainerError {
    ContainerError::MessagePack {
        offset: rd.position(),
        message: message.into(),
    }
}

fn read_bytes<const N: usize>(rd: &mut Reader<'_>) -> Result<[u8; N], ContainerError> {
    let mut buf = [0u8; N];
    rd.read_exact(&mut buf)
        .map_err(|e| error(rd, format!("reading {N} bytes: {e}")))?;
    Ok(buf)
}

fn read_len8(rd: &mut Reader<'_>) -> Result<usize, ContainerError> {
    Ok(read_bytes::<1>(rd)?[0] as usize)
}

fn read_len16(rd: &mut Reader<'_>) -> Result<usize, ContainerError> {
    Ok(u16::from_be_bytes(read_bytes(rd)?) as usize)
}

fn read_len32(rd: &mut Reader<'_>) -> Result<usize, ContainerError> {
    Ok(u32::from_be_bytes(read_bytes(rd)?) as usize)
}

fn read_value(rd: &mut Reader<'_>) -> Result<FieldValue, ContainerError> {
    let marker =
        rmp::decode::read_marker(rd).map_err(|e| error(rd, format!("marker: {e:?}")))?;

    match marker {
        Marker::Null => Ok(FieldValue::Nil),
        Marker::True => Ok(FieldValue::Bool(true)),
        Marker::False => Ok(FieldValue::Bool(false)),

        Marker::FixPos(v) => Ok(FieldValue::Int(v as i64)),
        Marker::FixNeg(v) => Ok(FieldValue::Int(v as i64)),
        Marker::U8 => Ok(FieldValue::Int(read_bytes::<1>(rd)?[0] as i64)),
        Marker::U16 => Ok(FieldValue::Int(u16::from_be_bytes(read_bytes(rd)?) as i64)),
        Marker::U32 => Ok(FieldValue::Int(u32::from_be_bytes(read_bytes(rd)?) as i64)),
        Marker::U64 => {
            let v = u64::from_be_bytes(read_bytes(rd)?);
            i64::try_from(v)
                .map(FieldValue::Int)
                .map_err(|_| error(rd, format!("unsigned integer {v} overflows i64")))
        }
        Marker::I8 => Ok(FieldValue::Int(read_bytes::<1>(rd)?[0] as i8 as i64)),
        Marker::I16 => Ok(FieldValue::Int(i16::from_be_bytes(read_bytes(rd)?) as i64)),
        Marker::I32 => Ok(FieldValue::Int(i32::from_be_bytes(read_bytes(rd)?) as i64)),
        Marker::I64 => Ok(FieldValue::Int(i64::from_be_bytes(read_bytes(rd)?))),
        Marker::F32 => Ok(FieldValue::Float(f32::from_be_bytes(read_bytes(rd)?) as f64)),
        Marker::F64 => Ok(FieldValue::Float(f64::from_be_bytes(read_bytes(rd)?))),

        Marker::FixStr(len) => read_string(rd, len as usize),
        Marker::Str8 => {
            let len = read_len8(rd)?;
            read_string(rd, len)
        }
        Marker::Str16 => {
            let len = read_len16(rd)?;
            read_string(rd, len)
        }
        Marker::Str32 => {
            let len = read_len32(rd)?;
            read_string(rd, len)
        }

        Marker::Bin8 => {
            let len = read_len8(rd)?;
            read_bin(rd, len)
        }
        Marker::Bin16 => {
            let len = read_len16(rd)?;
            read_bin(rd, len)
        }
        Marker::Bin32 => {
            let len = read_len32(rd)?;
            read_bin(rd, len)
        }

        Marker::FixArray(len) => read_array(rd, len as usize),
        Marker::Array16 => {
            let len = read_len16(rd)?;
            read_array(rd, len)
        }
        Marker::Array32 => {
            let len = read_len32(rd)?;
            read_array(rd, len)
        }

        Marker::FixMap(len) => read_map(rd, len as usize),
        Marker::Map16 => {
            let len = read_len16(rd)?;
            read_map(rd, len)
        }
        Marker::Map32 => {
            let len = read_len32(rd)?;
            read_map(rd, len)
        }

        other => Err(error(rd, format!("unsupported marker {other:?}"))),
    }
}

fn read_raw(rd: &mut Reader<'_>, len: usize) -> Result<Vec<u8>, ContainerError> {
    let remaining = rd.get_ref().len() as u64 - rd.position().min(rd.get_ref().len() as u64);
    if len as u64 > remaining {
        return Err(error(
            rd,
            format!("length {len} exceeds the {remaining} remaining bytes"),
        ));
    }
    let mut buf = vec![0u8; len];
    rd.read_exact(&mut buf)
        .map_err(|e| error(rd, format!("reading {len} bytes: {e}")))?;
    Ok(buf)
}

fn read_string(rd: &mut Reader<'_>, len: usize) -> Result<FieldValue, ContainerError> {
    let buf = read_raw(rd, len)?;
    String::from_utf8(buf)
        .map(FieldValue::Str)
        .map_err(|e| error(rd, format!("string is not UTF-8: {e}")))
}

fn read_bin(rd: &mut Reader<'_>, len: usize) -> Result<FieldValue, ContainerError> {
    read_raw(rd, len).map(FieldValue::Bin)
}

fn read_array(rd: &mut Reader<'_>, len: usize) -> Result<FieldValue, ContainerError> {
    let mut items = Vec::with_capacity(len.min(4096));
    for _ in 0..len {
        items.push(read_value(rd)?);
    }
    Ok(FieldValue::Array(items))
}

fn read_map(rd: &mut Reader<'_>, len: usize) -> Result<FieldValue, ContainerError> {
    let mut pairs = Vec::with_capacity(len.min(4096));
    for _ in 0..len {
        let key = match read_value(rd)? {
            FieldValue::Str(s) => s,
            other => return Err(ContainerError::NonStringKey(other.kind())),
        };
        let value = read_value(rd)?;
        pairs.push((key, value));
    }
    Ok(FieldValue::Map(pairs))
}

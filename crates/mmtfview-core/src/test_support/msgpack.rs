//! MessagePack encoding of containers, the inverse of `core::io::msgpack`.

use crate::core::io::container::{Container, FieldValue};

pub(crate) fn encode_container(container: &Container) -> Vec<u8> {
    let pairs: Vec<(String, FieldValue)> = container.clone().into_fields().into_iter().collect();
    let mut buf = Vec::new();
    write_value(&mut buf, &FieldValue::Map(pairs));
    buf
}

fn write_value(buf: &mut Vec<u8>, value: &FieldValue) {
    use rmp::encode;
    match value {
        FieldValue::Nil => encode::write_nil(buf).unwrap(),
        FieldValue::Bool(b) => encode::write_bool(buf, *b).unwrap(),
        FieldValue::Int(v) => {
            encode::write_sint(buf, *v).unwrap();
        }
        FieldValue::Float(v) => encode::write_f64(buf, *v).unwrap(),
        FieldValue::Str(s) => encode::write_str(buf, s).unwrap(),
        FieldValue::Bin(b) => encode::write_bin(buf, b).unwrap(),
        FieldValue::Array(items) => {
            encode::write_array_len(buf, items.len() as u32).unwrap();
            for item in items {
                write_value(buf, item);
            }
        }
        FieldValue::Map(pairs) => {
            encode::write_map_len(buf, pairs.len() as u32).unwrap();
            for (key, item) in pairs {
                encode::write_str(buf, key).unwrap();
                write_value(buf, item);
            }
        }
    }
}

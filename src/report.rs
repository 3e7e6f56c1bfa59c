//! Presentation helpers for layouts and decoded records
//!
//! Everything here is purely derived: rendering a checklist or exporting a
//! record never touches the decoder and never alters a value.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::decoder::DecodedRecord;
use crate::layout::{FieldDescriptor, LayoutConfig};

/// Render a human-readable configuration checklist
///
/// Fields are listed sorted by `(byte_offset, bit_offset)` so the table
/// reads in wire order even when the layout declares fields out of order.
pub fn checklist(config: &LayoutConfig) -> String {
    let mut out = String::new();
    out.push_str("=== Layout Checklist ===\n");
    out.push_str(&format!("1. Total Length: {} bytes\n", config.total_length));

    match &config.header {
        None => out.push_str("2. Header:       None\n"),
        Some(header) => out.push_str(&format!(
            "2. Header:       0x{} (reserved: {})\n",
            hex::encode_upper(&header.constant),
            header.reserved
        )),
    }

    match &config.checksum {
        None => out.push_str("3. Checksum:     None\n"),
        Some(checksum) => out.push_str(&format!(
            "3. Checksum:     {} (trailer: {})\n",
            checksum.kind.name(),
            checksum.length
        )),
    }

    out.push_str(&format!("4. Fields ({}):\n", config.fields.len()));
    let mut sorted: Vec<&FieldDescriptor> = config.fields.iter().collect();
    sorted.sort_by_key(|f| (f.byte_offset, f.bit_offset));

    for field in sorted {
        out.push_str(&format!("   - [offset {:>3}]", field.byte_offset));
        if field.bit_count > 0 {
            out.push_str(&format!(
                " [bits {}:{}]",
                field.bit_offset,
                field.bit_offset + field.bit_count - 1
            ));
        }
        out.push_str(&format!(
            " {:<20} type: {:<6}",
            field.name,
            field.field_type.name()
        ));
        if field.has_affine() {
            out.push_str(&format!(" (scale: {}, bias: {})", field.scale, field.bias));
        }
        out.push('\n');
    }
    out.push_str("========================\n");
    out
}

/// Render a decoded record as flat `name = value` lines, in name order
pub fn dump_flat(record: &DecodedRecord) -> String {
    let mut out = String::new();
    for (name, value) in record {
        out.push_str(&format!("{name} = {value}\n"));
    }
    out
}

/// Nested-tree export of decoded records
///
/// Dotted field names become nesting levels: `temp.engine` lands at
/// `{"temp": {"engine": ...}}`. The transform is lossless; values pass
/// through unchanged.
#[cfg(feature = "json")]
pub mod json {
    use serde_json::{Map, Number};

    use crate::decoder::DecodedRecord;
    use crate::value::Value;

    /// Convert one decoded value to its JSON representation
    fn to_json(value: &Value) -> serde_json::Value {
        match value {
            Value::U64(v) => serde_json::Value::Number(Number::from(*v)),
            Value::I64(v) => serde_json::Value::Number(Number::from(*v)),
            Value::F64(v) => Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Text(v) => serde_json::Value::String(v.clone()),
        }
    }

    /// Build the nested JSON tree for a decoded record
    pub fn json_tree(record: &DecodedRecord) -> serde_json::Value {
        let mut root = Map::new();

        for (name, value) in record {
            let mut segments = name.split('.').peekable();
            let mut current = &mut root;

            while let Some(segment) = segments.next() {
                if segments.peek().is_none() {
                    current.insert(segment.into(), to_json(value));
                } else {
                    let entry = current
                        .entry(segment)
                        .or_insert_with(|| serde_json::Value::Object(Map::new()));
                    if !entry.is_object() {
                        *entry = serde_json::Value::Object(Map::new());
                    }
                    current = match entry {
                        serde_json::Value::Object(map) => map,
                        _ => unreachable!("entry was just made an object"),
                    };
                }
            }
        }

        serde_json::Value::Object(root)
    }
}

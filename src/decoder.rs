//! Record decode pipeline and per-field extraction
//!
//! A [`RecordDecoder`] borrows an approved layout and turns raw byte buffers
//! into named, typed values. The pipeline order is fixed: buffer length
//! check, header constant check, checksum trailer check, then field
//! extraction. Any precondition failure aborts before a single field is
//! read; field extraction itself cannot fail, because validation already
//! proved every field fits inside the record.
//!
//! Decoding never mutates the buffer or the layout, so one decoder (or one
//! shared layout) can serve any number of threads.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::crc16;
use crate::error::{DecodeError, DecodeResult};
use crate::layout::{ChecksumKind, FieldDescriptor};
use crate::types::FieldType;
use crate::validator::ApprovedLayout;
use crate::value::Value;

/// Decoded record: field name to tagged value, in name order
pub type DecodedRecord = BTreeMap<String, Value>;

/// Decoder for records of one approved layout
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder<'a> {
    layout: &'a ApprovedLayout,
}

impl<'a> RecordDecoder<'a> {
    /// Create a decoder over the given layout
    #[inline]
    pub fn new(layout: &'a ApprovedLayout) -> Self {
        Self { layout }
    }

    /// Decode one record from `buf`
    ///
    /// The buffer may be longer than the layout's total length; extra
    /// trailing bytes are ignored.
    pub fn decode(&self, buf: &[u8]) -> DecodeResult<DecodedRecord> {
        let config = self.layout.config();

        if buf.len() < config.total_length {
            return Err(DecodeError::BufferTooShort {
                actual: buf.len(),
                needed: config.total_length,
            });
        }

        if let Some(header) = &config.header {
            for (index, &expected) in header.constant.iter().enumerate() {
                if buf[index] != expected {
                    return Err(DecodeError::HeaderMismatch {
                        index,
                        expected,
                        actual: buf[index],
                    });
                }
            }
        }

        if let Some(checksum) = &config.checksum {
            let data_len = self.layout.checksum_data_len();
            let computed = match checksum.kind {
                ChecksumKind::Crc16 => crc16::crc16(&buf[..data_len]),
            };
            let stored = crc16::read_trailer(&buf[data_len..]);
            if computed != stored {
                return Err(DecodeError::ChecksumMismatch { computed, stored });
            }
        }

        let mut record = DecodedRecord::new();
        for field in &config.fields {
            record.insert(field.name.clone(), extract(field, buf));
        }
        Ok(record)
    }
}

/// Extract one field's value from a buffer the layout already fits
fn extract(field: &FieldDescriptor, buf: &[u8]) -> Value {
    let width = field.field_type.width();
    let raw = &buf[field.byte_offset..field.byte_offset + width];
    // Unsigned bit pattern of the endianness-corrected value; all further
    // interpretation starts from this.
    let pattern = read_pattern(raw, field.big_endian);

    match field.field_type {
        FieldType::F32 => {
            // Affine transform applies unconditionally to float readings.
            let value = f32::from_bits(pattern) as f64;
            Value::F64(field.apply_affine(value))
        }
        FieldType::Bool => {
            let bit = if field.bit_count > 0 {
                (pattern >> field.bit_offset) & 1
            } else {
                pattern & 1
            };
            Value::Bool(bit != 0)
        }
        _ => extract_integer(field, pattern, width),
    }
}

/// Finalize an integer field from its corrected bit pattern
fn extract_integer(field: &FieldDescriptor, pattern: u32, width: usize) -> Value {
    if field.bit_count > 0 {
        // A bit-extracted result is always unsigned, whatever the type's
        // declared sign.
        let mask = (1u64 << field.bit_count) - 1;
        let extracted = (pattern as u64 >> field.bit_offset) & mask;
        if field.has_affine() {
            Value::F64(field.apply_affine(extracted as f64))
        } else {
            Value::U64(extracted)
        }
    } else if field.field_type.is_signed() {
        let value = sign_extend(pattern, width);
        if field.has_affine() {
            Value::F64(field.apply_affine(value as f64))
        } else {
            Value::I64(value)
        }
    } else {
        let value = pattern as u64;
        if field.has_affine() {
            Value::F64(field.apply_affine(value as f64))
        } else {
            Value::U64(value)
        }
    }
}

/// Read up to 4 bytes as an unsigned bit pattern, correcting endianness
#[inline]
fn read_pattern(raw: &[u8], big_endian: bool) -> u32 {
    match raw.len() {
        1 => raw[0] as u32,
        2 => {
            let bytes = [raw[0], raw[1]];
            if big_endian {
                u16::from_be_bytes(bytes) as u32
            } else {
                u16::from_le_bytes(bytes) as u32
            }
        }
        4 => {
            let bytes = [raw[0], raw[1], raw[2], raw[3]];
            if big_endian {
                u32::from_be_bytes(bytes)
            } else {
                u32::from_le_bytes(bytes)
            }
        }
        _ => unreachable!("type catalog widths are 1, 2 or 4"),
    }
}

/// Sign-extend a `width`-byte pattern to i64
#[inline]
fn sign_extend(pattern: u32, width: usize) -> i64 {
    match width {
        1 => pattern as u8 as i8 as i64,
        2 => pattern as u16 as i16 as i64,
        4 => pattern as i32 as i64,
        _ => unreachable!("type catalog widths are 1, 2 or 4"),
    }
}

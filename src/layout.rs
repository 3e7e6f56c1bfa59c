//! Layout data model and builder surface
//!
//! A [`LayoutConfig`] is the immutable declarative description of one record:
//! total length, optional reserved header and checksum regions, and an
//! ordered list of [`FieldDescriptor`]s. It is produced either by the
//! configuration loader or programmatically through [`LayoutBuilder`], and is
//! inert until [`validate`](crate::validator::validate) approves it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{LayoutError, LayoutResult};
use crate::types::FieldType;
use crate::validator::{self, ApprovedLayout};

/// Descriptor of one named, typed sub-range of a record
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, unique within a layout; dotted segments nest in exports
    pub name: String,
    /// Zero-based offset of the field's first byte
    pub byte_offset: usize,
    /// Scalar type determining width and interpretation
    pub field_type: FieldType,
    /// Bit offset from the LSB of the endianness-corrected value
    pub bit_offset: u8,
    /// Number of bits occupied; 0 means the full type width
    pub bit_count: u8,
    /// Byte order of the raw bytes at `byte_offset`
    pub big_endian: bool,
    /// Affine scale applied after extraction
    pub scale: f64,
    /// Affine bias applied after extraction
    pub bias: f64,
}

impl FieldDescriptor {
    /// Create a descriptor with defaults: full width, big-endian, identity
    /// affine transform
    pub fn new(name: impl Into<String>, byte_offset: usize, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            byte_offset,
            field_type,
            bit_offset: 0,
            bit_count: 0,
            big_endian: true,
            scale: 1.0,
            bias: 0.0,
        }
    }

    /// Create a descriptor from a type *name*, rejecting unknown names
    /// immediately rather than at validation
    pub fn with_type_name(
        name: impl Into<String>,
        byte_offset: usize,
        type_name: &str,
    ) -> LayoutResult<Self> {
        Ok(Self::new(name, byte_offset, FieldType::parse(type_name)?))
    }

    /// Restrict the field to `bit_count` bits starting `bit_offset` bits
    /// from the LSB of the corrected value
    #[inline]
    pub fn bits(mut self, bit_offset: u8, bit_count: u8) -> Self {
        self.bit_offset = bit_offset;
        self.bit_count = bit_count;
        self
    }

    /// Interpret the raw bytes as little-endian
    #[inline]
    pub fn little_endian(mut self) -> Self {
        self.big_endian = false;
        self
    }

    /// Attach an affine transform `out = raw * scale + bias`
    #[inline]
    pub fn scaled(mut self, scale: f64, bias: f64) -> Self {
        self.scale = scale;
        self.bias = bias;
        self
    }

    /// Whether the field occupies fewer bits than its type
    #[inline]
    pub fn is_bit_field(&self) -> bool {
        self.bit_count > 0
    }

    /// Whether the affine transform is non-identity
    #[inline]
    pub fn has_affine(&self) -> bool {
        self.scale != 1.0 || self.bias != 0.0
    }

    /// Apply the affine transform to a raw numeric reading
    #[inline]
    pub fn apply_affine(&self, raw: f64) -> f64 {
        raw * self.scale + self.bias
    }

    /// Bits actually occupied (declared bit count, or the full type width)
    #[inline]
    pub fn effective_bit_count(&self) -> usize {
        if self.bit_count > 0 {
            self.bit_count as usize
        } else {
            self.field_type.width() * 8
        }
    }

    /// Absolute bit range claimed within the record
    ///
    /// Saturates at the top of the address range for pathological offsets;
    /// validation rejects such descriptors before the range is ever walked.
    #[inline]
    pub fn bit_range(&self) -> core::ops::Range<usize> {
        let start = self
            .byte_offset
            .saturating_mul(8)
            .saturating_add(self.bit_offset as usize);
        start..start.saturating_add(self.effective_bit_count())
    }
}

/// Supported checksum algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumKind {
    /// 16-bit CRC, MODBUS polynomial, little-endian trailer
    Crc16,
}

impl ChecksumKind {
    /// Trailer length the algorithm requires, in bytes
    #[inline]
    pub const fn trailer_len(&self) -> usize {
        match self {
            ChecksumKind::Crc16 => 2,
        }
    }

    /// Canonical algorithm name as it appears in configuration text
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            ChecksumKind::Crc16 => "CRC16",
        }
    }

    /// Look up an algorithm by name
    ///
    /// Unsupported names fail here, eagerly, so a bad algorithm can never
    /// surface at decode time.
    pub fn parse(name: &str) -> LayoutResult<Self> {
        match name {
            "CRC16" => Ok(ChecksumKind::Crc16),
            _ => Err(LayoutError::UnsupportedChecksum {
                kind: String::from(name),
            }),
        }
    }
}

/// Reserved leading region checked against a constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    /// Exact bytes expected at offset 0
    pub constant: Vec<u8>,
    /// Leading bytes reserved, `>= constant.len()`; trailing reserved bytes
    /// are unchecked but unavailable to fields
    pub reserved: usize,
}

/// Reserved trailing region holding a computed integrity value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumSpec {
    /// Checksum algorithm
    pub kind: ChecksumKind,
    /// Trailing bytes reserved for the checksum
    pub length: usize,
}

/// Declarative description of one record's byte/bit structure
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Record size in bytes
    pub total_length: usize,
    /// Optional reserved header region
    pub header: Option<HeaderSpec>,
    /// Optional reserved checksum trailer
    pub checksum: Option<ChecksumSpec>,
    /// Ordered field descriptors
    pub fields: Vec<FieldDescriptor>,
}

impl LayoutConfig {
    /// Start building a layout for a record of `total_length` bytes
    pub fn builder(total_length: usize) -> LayoutBuilder {
        LayoutBuilder::new(total_length)
    }

    /// Validate the layout, consuming it into an [`ApprovedLayout`]
    pub fn validate(self) -> LayoutResult<ApprovedLayout> {
        validator::validate(self)
    }
}

/// Fluent builder for [`LayoutConfig`]
#[derive(Debug, Clone)]
pub struct LayoutBuilder {
    config: LayoutConfig,
}

impl LayoutBuilder {
    /// Create a builder for a record of `total_length` bytes
    pub fn new(total_length: usize) -> Self {
        Self {
            config: LayoutConfig {
                total_length,
                header: None,
                checksum: None,
                fields: Vec::new(),
            },
        }
    }

    /// Declare a header constant and its reserved length
    pub fn header(mut self, constant: &[u8], reserved: usize) -> Self {
        self.config.header = Some(HeaderSpec {
            constant: constant.to_vec(),
            reserved,
        });
        self
    }

    /// Declare a checksum trailer
    pub fn checksum(mut self, kind: ChecksumKind, length: usize) -> Self {
        self.config.checksum = Some(ChecksumSpec { kind, length });
        self
    }

    /// Append a field descriptor
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.config.fields.push(descriptor);
        self
    }

    /// Append a field by type name, rejecting an unknown name here rather
    /// than at validation
    pub fn try_field(
        self,
        name: impl Into<String>,
        byte_offset: usize,
        type_name: &str,
    ) -> LayoutResult<Self> {
        let descriptor = FieldDescriptor::with_type_name(name, byte_offset, type_name)?;
        Ok(self.field(descriptor))
    }

    /// Finish building the (not yet validated) layout
    pub fn build(self) -> LayoutConfig {
        self.config
    }

    /// Finish building and validate in one step
    pub fn validate(self) -> LayoutResult<ApprovedLayout> {
        self.config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let d = FieldDescriptor::new("speed", 3, FieldType::U16);
        assert_eq!(d.bit_offset, 0);
        assert_eq!(d.bit_count, 0);
        assert!(d.big_endian);
        assert!(!d.is_bit_field());
        assert!(!d.has_affine());
        assert_eq!(d.effective_bit_count(), 16);
        assert_eq!(d.bit_range(), 24..40);
    }

    #[test]
    fn test_descriptor_bit_field_range() {
        let d = FieldDescriptor::new("mode", 2, FieldType::U8).bits(1, 3);
        assert!(d.is_bit_field());
        assert_eq!(d.effective_bit_count(), 3);
        assert_eq!(d.bit_range(), 17..20);
    }

    #[test]
    fn test_bit_range_saturates_at_extreme_offsets() {
        let d = FieldDescriptor::new("x", usize::MAX, FieldType::U32);
        assert_eq!(d.bit_range().end, usize::MAX);
    }

    #[test]
    fn test_descriptor_affine() {
        let d = FieldDescriptor::new("temp", 0, FieldType::I16).scaled(0.5, -40.0);
        assert!(d.has_affine());
        assert_eq!(d.apply_affine(100.0), 10.0);
    }

    #[test]
    fn test_with_type_name_rejects_eagerly() {
        assert!(FieldDescriptor::with_type_name("x", 0, "uint16").is_ok());
        let err = FieldDescriptor::with_type_name("x", 0, "double").unwrap_err();
        assert!(matches!(err, LayoutError::UnknownType { .. }));
    }

    #[test]
    fn test_builder_assembles_config() {
        let config = LayoutConfig::builder(20)
            .header(&[0x02, 0x03], 2)
            .checksum(ChecksumKind::Crc16, 2)
            .field(FieldDescriptor::new("a", 2, FieldType::U8))
            .try_field("b", 3, "uint16")
            .unwrap()
            .build();

        assert_eq!(config.total_length, 20);
        assert_eq!(config.header.as_ref().unwrap().constant, [0x02, 0x03]);
        assert_eq!(config.header.as_ref().unwrap().reserved, 2);
        assert_eq!(config.checksum.unwrap().kind, ChecksumKind::Crc16);
        assert_eq!(config.fields.len(), 2);
        assert_eq!(config.fields[1].field_type, FieldType::U16);
    }

    #[test]
    fn test_builder_try_field_bad_type() {
        let err = LayoutConfig::builder(4)
            .try_field("x", 0, "uint64")
            .unwrap_err();
        assert!(matches!(err, LayoutError::UnknownType { .. }));
    }

    #[test]
    fn test_checksum_kind_parse() {
        assert_eq!(ChecksumKind::parse("CRC16").unwrap(), ChecksumKind::Crc16);
        assert_eq!(ChecksumKind::Crc16.trailer_len(), 2);
        let err = ChecksumKind::parse("CRC32").unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedChecksum { .. }));
    }
}

//! Error types for layout validation and record decoding
//!
//! Validation and decoding have disjoint failure taxonomies: a
//! [`LayoutError`] means the declarative layout itself is inconsistent and
//! can never decode anything, while a [`DecodeError`] means a concrete byte
//! buffer failed the preconditions of an already-approved layout. Every
//! variant carries the identities needed to pinpoint the failure without
//! re-running validation.

use alloc::string::String;
use core::fmt;

/// Identity of a bit-range claimant inside a layout
///
/// Used in overlap reports to name both parties of a collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claimant {
    /// The reserved leading header region
    Header,
    /// The reserved trailing checksum region
    Checksum,
    /// A named field
    Field(String),
}

impl fmt::Display for Claimant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Claimant::Header => f.write_str("header region"),
            Claimant::Checksum => f.write_str("checksum trailer"),
            Claimant::Field(name) => write!(f, "field `{name}`"),
        }
    }
}

/// Errors produced by layout validation
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Total record length is zero
    ZeroTotalLength,
    /// Total record length in bits overflows the platform's address range
    TotalLengthTooLarge {
        /// Total record length in bytes
        total: usize,
    },
    /// A reserved region does not fit inside the record
    Size {
        /// Which reserved region is oversized
        region: Claimant,
        /// Reserved length in bytes
        reserved: usize,
        /// Total record length in bytes
        total: usize,
    },
    /// Header constant is longer than its reserved region
    HeaderConstantTooLong {
        /// Length of the declared constant in bytes
        constant: usize,
        /// Reserved header length in bytes
        reserved: usize,
    },
    /// Checksum trailer length does not match the algorithm's output size
    ChecksumLength {
        /// Required trailer length for the declared algorithm
        expected: usize,
        /// Declared trailer length
        actual: usize,
    },
    /// Checksum algorithm name is not supported
    UnsupportedChecksum {
        /// The rejected algorithm name
        kind: String,
    },
    /// Two claimants own the same bit
    Overlap {
        /// The later claimant (always the one being added)
        claimant: Claimant,
        /// The earlier claimant already owning the bit
        prior: Claimant,
        /// Absolute bit index of the first collision
        bit: usize,
    },
    /// A field extends past the end of the record
    Bounds {
        /// Name of the offending field
        field: String,
        /// One past the field's last byte
        end: usize,
        /// Total record length in bytes
        total: usize,
    },
    /// A bit-field does not fit inside its declared type
    BitWidth {
        /// Name of the offending field
        field: String,
        /// Declared bit offset
        bit_offset: u8,
        /// Declared bit count
        bit_count: u8,
        /// Bit width of the field's type
        type_bits: u8,
    },
    /// A float field declares a bit range
    FloatBitField {
        /// Name of the offending field
        field: String,
    },
    /// Type name is not in the type catalog
    UnknownType {
        /// The rejected type name
        type_name: String,
    },
    /// Two fields share the same name
    DuplicateName {
        /// The repeated field name
        field: String,
    },
    /// Field name is empty
    EmptyFieldName,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::ZeroTotalLength => {
                f.write_str("total record length must be greater than 0")
            }
            LayoutError::TotalLengthTooLarge { total } => {
                write!(f, "total record length of {total} bytes cannot be addressed bit-wise")
            }
            LayoutError::Size {
                region,
                reserved,
                total,
            } => write!(
                f,
                "{region} reserves {reserved} bytes but the record is only {total} bytes"
            ),
            LayoutError::HeaderConstantTooLong { constant, reserved } => write!(
                f,
                "header constant is {constant} bytes but only {reserved} bytes are reserved"
            ),
            LayoutError::ChecksumLength { expected, actual } => {
                write!(f, "checksum trailer must be {expected} bytes, got {actual}")
            }
            LayoutError::UnsupportedChecksum { kind } => {
                write!(f, "unsupported checksum algorithm `{kind}`")
            }
            LayoutError::Overlap {
                claimant,
                prior,
                bit,
            } => write!(f, "{claimant} overlaps {prior} at bit {bit}"),
            LayoutError::Bounds { field, end, total } => write!(
                f,
                "field `{field}` ends at byte {end}, past the {total}-byte record"
            ),
            LayoutError::BitWidth {
                field,
                bit_offset,
                bit_count,
                type_bits,
            } => write!(
                f,
                "field `{field}` claims bits {bit_offset}..{} of a {type_bits}-bit type",
                bit_offset + bit_count
            ),
            LayoutError::FloatBitField { field } => {
                write!(f, "field `{field}`: float types cannot be restricted to a bit range")
            }
            LayoutError::UnknownType { type_name } => {
                write!(f, "unknown field type `{type_name}`")
            }
            LayoutError::DuplicateName { field } => {
                write!(f, "duplicate field name `{field}`")
            }
            LayoutError::EmptyFieldName => f.write_str("field name must not be empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

/// Errors produced by record decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer is shorter than the layout's total length
    BufferTooShort {
        /// Bytes supplied by the caller
        actual: usize,
        /// Bytes the layout requires
        needed: usize,
    },
    /// Buffer does not begin with the declared header constant
    HeaderMismatch {
        /// Index of the first differing byte
        index: usize,
        /// Byte the layout expects at that index
        expected: u8,
        /// Byte actually present
        actual: u8,
    },
    /// Computed checksum does not match the trailer
    ChecksumMismatch {
        /// Checksum computed over the data range
        computed: u16,
        /// Checksum stored in the trailer
        stored: u16,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::BufferTooShort { actual, needed } => {
                write!(f, "buffer is {actual} bytes, layout requires {needed}")
            }
            DecodeError::HeaderMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "header mismatch at byte {index}: expected 0x{expected:02X}, got 0x{actual:02X}"
            ),
            DecodeError::ChecksumMismatch { computed, stored } => write!(
                f,
                "checksum mismatch: computed 0x{computed:04X}, trailer holds 0x{stored:04X}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Result type alias for layout validation
pub type LayoutResult<T> = core::result::Result<T, LayoutError>;

/// Result type alias for record decoding
pub type DecodeResult<T> = core::result::Result<T, DecodeError>;

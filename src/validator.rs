//! Bit-level layout validation
//!
//! Validation proves a layout is bijective: every bit in the record belongs
//! to at most one owner (the header region, the checksum trailer, or exactly
//! one field). Byte-level bounds checks alone are not enough, since
//! bit-fields sharing a byte pass any byte-range test; the validator walks
//! the exact bit range each field claims. Bit positions are relative to the
//! endianness-corrected value of the field's type, never to the raw wire
//! byte order.
//!
//! The ownership array is local to one `validate` call, so validation is
//! pure, idempotent and freely reentrant.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Claimant, LayoutError, LayoutResult};
use crate::layout::LayoutConfig;
use crate::types::FieldType;

/// Owner of a single bit during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Free,
    Header,
    Checksum,
    Field(usize),
}

impl Owner {
    /// Translate an owner into the public claimant identity
    fn claimant(self, config: &LayoutConfig) -> Claimant {
        match self {
            Owner::Header => Claimant::Header,
            Owner::Checksum => Claimant::Checksum,
            Owner::Field(i) => Claimant::Field(config.fields[i].name.clone()),
            Owner::Free => unreachable!("free bits are never reported"),
        }
    }
}

/// A layout that passed bit-level validation
///
/// The wrapped config can no longer be altered, so one `ApprovedLayout` is
/// safe to share read-only across concurrent decode calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovedLayout {
    config: LayoutConfig,
}

impl ApprovedLayout {
    /// The validated configuration
    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Record size in bytes
    #[inline]
    pub fn total_length(&self) -> usize {
        self.config.total_length
    }

    /// Bytes covered by the checksum, i.e. everything before the trailer
    #[inline]
    pub fn checksum_data_len(&self) -> usize {
        match &self.config.checksum {
            Some(spec) => self.config.total_length - spec.length,
            None => self.config.total_length,
        }
    }
}

/// Validate a layout, proving no two claimants share a bit
///
/// Claim order is header, then checksum trailer, then fields in declaration
/// order; on a collision the later claimant is always the one blamed.
pub fn validate(config: LayoutConfig) -> LayoutResult<ApprovedLayout> {
    if config.total_length == 0 {
        return Err(LayoutError::ZeroTotalLength);
    }

    let total_bits = match config.total_length.checked_mul(8) {
        Some(bits) => bits,
        None => {
            return Err(LayoutError::TotalLengthTooLarge {
                total: config.total_length,
            })
        }
    };
    let mut owners: Vec<Owner> = vec![Owner::Free; total_bits];

    if let Some(header) = &config.header {
        if header.reserved > config.total_length {
            return Err(LayoutError::Size {
                region: Claimant::Header,
                reserved: header.reserved,
                total: config.total_length,
            });
        }
        // Reserved length is authoritative: the constant must fit inside it.
        if header.constant.len() > header.reserved {
            return Err(LayoutError::HeaderConstantTooLong {
                constant: header.constant.len(),
                reserved: header.reserved,
            });
        }
        for owner in owners.iter_mut().take(header.reserved * 8) {
            *owner = Owner::Header;
        }
    }

    if let Some(checksum) = &config.checksum {
        if checksum.length > config.total_length {
            return Err(LayoutError::Size {
                region: Claimant::Checksum,
                reserved: checksum.length,
                total: config.total_length,
            });
        }
        if checksum.length != checksum.kind.trailer_len() {
            return Err(LayoutError::ChecksumLength {
                expected: checksum.kind.trailer_len(),
                actual: checksum.length,
            });
        }
        let start = (config.total_length - checksum.length) * 8;
        for bit in start..total_bits {
            if owners[bit] != Owner::Free {
                return Err(LayoutError::Overlap {
                    claimant: Claimant::Checksum,
                    prior: owners[bit].claimant(&config),
                    bit,
                });
            }
            owners[bit] = Owner::Checksum;
        }
    }

    for (i, field) in config.fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(LayoutError::EmptyFieldName);
        }
        if config.fields[..i].iter().any(|f| f.name == field.name) {
            return Err(LayoutError::DuplicateName {
                field: field.name.clone(),
            });
        }

        // Saturating add: an offset near usize::MAX must land in the bounds
        // error, not wrap past the length check.
        let width = field.field_type.width();
        let end = field.byte_offset.saturating_add(width);
        if end > config.total_length {
            return Err(LayoutError::Bounds {
                field: field.name.clone(),
                end,
                total: config.total_length,
            });
        }

        if field.bit_count > 0 {
            // A float's bit pattern is only meaningful whole; the decoder
            // never masks it.
            if field.field_type == FieldType::F32 {
                return Err(LayoutError::FloatBitField {
                    field: field.name.clone(),
                });
            }
            let type_bits = field.field_type.bit_width();
            if field.bit_offset as usize + field.bit_count as usize > type_bits as usize {
                return Err(LayoutError::BitWidth {
                    field: field.name.clone(),
                    bit_offset: field.bit_offset,
                    bit_count: field.bit_count,
                    type_bits,
                });
            }
        } else if field.bit_offset != 0 {
            // A bit offset is meaningless without a bit count, and would
            // shift the claimed range past the field's own bytes.
            return Err(LayoutError::BitWidth {
                field: field.name.clone(),
                bit_offset: field.bit_offset,
                bit_count: 0,
                type_bits: field.field_type.bit_width(),
            });
        }

        for bit in field.bit_range() {
            if owners[bit] != Owner::Free {
                return Err(LayoutError::Overlap {
                    claimant: Claimant::Field(field.name.clone()),
                    prior: owners[bit].claimant(&config),
                    bit,
                });
            }
            owners[bit] = Owner::Field(i);
        }
    }

    Ok(ApprovedLayout { config })
}

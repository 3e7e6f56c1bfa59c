//! Scalar type catalog for record fields
//!
//! Every field in a layout is declared with one of these fixed-width scalar
//! types. The catalog is a closed set: width, bit width and interpretation
//! are compile-time constants, and the decoder dispatches exhaustively over
//! the variants instead of comparing type-name strings.

use crate::error::LayoutError;

/// Widest type in the catalog, in bytes
pub const MAX_TYPE_WIDTH: usize = 4;

/// Supported scalar field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    U8,
    /// Signed 8-bit integer
    I8,
    /// Unsigned 16-bit integer
    U16,
    /// Signed 16-bit integer
    I16,
    /// Unsigned 32-bit integer
    U32,
    /// Signed 32-bit integer
    I32,
    /// IEEE-754 binary32
    F32,
    /// Single-bit boolean carried in one byte
    Bool,
}

impl FieldType {
    /// Byte width of the type on the wire
    #[inline]
    pub const fn width(&self) -> usize {
        match self {
            FieldType::U8 | FieldType::I8 | FieldType::Bool => 1,
            FieldType::U16 | FieldType::I16 => 2,
            FieldType::U32 | FieldType::I32 | FieldType::F32 => 4,
        }
    }

    /// Bit width of the type (upper bound for bit-field declarations)
    #[inline]
    pub const fn bit_width(&self) -> u8 {
        (self.width() * 8) as u8
    }

    /// Whether the default interpretation is a signed integer
    #[inline]
    pub const fn is_signed(&self) -> bool {
        matches!(self, FieldType::I8 | FieldType::I16 | FieldType::I32)
    }

    /// Canonical type name as it appears in configuration text
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            FieldType::U8 => "uint8",
            FieldType::I8 => "int8",
            FieldType::U16 => "uint16",
            FieldType::I16 => "int16",
            FieldType::U32 => "uint32",
            FieldType::I32 => "int32",
            FieldType::F32 => "float",
            FieldType::Bool => "bool",
        }
    }

    /// Look up a type by its configuration name
    ///
    /// Returns [`LayoutError::UnknownType`] for names outside the catalog so
    /// that a bad type string is rejected at the point a field is added,
    /// never deferred to layout validation.
    pub fn parse(name: &str) -> Result<Self, LayoutError> {
        match name {
            "uint8" => Ok(FieldType::U8),
            "int8" => Ok(FieldType::I8),
            "uint16" => Ok(FieldType::U16),
            "int16" => Ok(FieldType::I16),
            "uint32" => Ok(FieldType::U32),
            "int32" => Ok(FieldType::I32),
            "float" => Ok(FieldType::F32),
            "bool" => Ok(FieldType::Bool),
            _ => Err(LayoutError::UnknownType {
                type_name: alloc::string::String::from(name),
            }),
        }
    }

    /// All catalog entries in declaration order
    pub const ALL: [FieldType; 8] = [
        FieldType::U8,
        FieldType::I8,
        FieldType::U16,
        FieldType::I16,
        FieldType::U32,
        FieldType::I32,
        FieldType::F32,
        FieldType::Bool,
    ];
}

impl core::fmt::Display for FieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

//! Framelay: declarative fixed-layout binary record decoding
//!
//! This crate decodes fixed-layout binary records (sensor frames, protocol
//! packets) described by a declarative field layout into typed, named
//! values, and proves the layout itself is consistent before any data is
//! touched.
//!
//! # Record Shape
//!
//! ```text
//! +---------------------+----------------------------+------------------+
//! | Header (optional)   | Fields (byte/bit ranges)   | CRC16 (optional) |
//! | constant, reserved  | typed, endian, scale/bias  | MODBUS, LE       |
//! +---------------------+----------------------------+------------------+
//! ```
//!
//! # Pipeline
//!
//! 1. Describe the layout with [`LayoutBuilder`] or load it from INI-style
//!    text with the `config` module.
//! 2. Validate it into an [`ApprovedLayout`]: every bit of the record is
//!    proven to have at most one owner (header, checksum trailer, or one
//!    field), with precise conflict reports otherwise.
//! 3. Decode buffers with [`RecordDecoder`]; each field is read, endianness
//!    corrected, bit-masked, and rescaled into a tagged [`Value`].
//!
//! Validation and decoding are pure and reentrant; an `ApprovedLayout` can
//! be shared read-only across threads.
//!
//! # Example
//!
//! ```rust
//! use framelay::*;
//!
//! // 8-byte record: 2-byte start code, big-endian u16 reading, a rescaled
//! // temperature byte, 2-byte CRC16 trailer.
//! let layout = LayoutConfig::builder(8)
//!     .header(&[0x02, 0x03], 2)
//!     .checksum(ChecksumKind::Crc16, 2)
//!     .field(FieldDescriptor::new("speed", 2, FieldType::U16))
//!     .field(FieldDescriptor::new("temp", 4, FieldType::U8).scaled(0.5, -40.0))
//!     .validate()?;
//!
//! let mut buf = [0x02, 0x03, 0x12, 0x34, 100, 0x00, 0, 0];
//! let crc = crc16::crc16(&buf[..6]);
//! buf[6..8].copy_from_slice(&crc.to_le_bytes());
//!
//! let record = RecordDecoder::new(&layout).decode(&buf)?;
//! assert_eq!(record["speed"], Value::U64(0x1234));
//! assert_eq!(record["temp"], Value::F64(10.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(feature = "std")]
pub mod config;
pub mod crc16;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod report;
pub mod types;
pub mod validator;
pub mod value;

// Re-export main types
pub use decoder::{DecodedRecord, RecordDecoder};
pub use error::{Claimant, DecodeError, LayoutError};
pub use layout::{
    ChecksumKind, ChecksumSpec, FieldDescriptor, HeaderSpec, LayoutBuilder, LayoutConfig,
};
pub use types::{FieldType, MAX_TYPE_WIDTH};
pub use validator::{validate, ApprovedLayout};
pub use value::Value;

//! Configuration loader for the INI-style layout text format
//!
//! The loader is a pure producer of [`LayoutConfig`]: it parses text, fails
//! loudly on anything malformed, and never attempts to guess intent. A
//! config that parses is still unvalidated; handing it to the validator is
//! the caller's explicit next step.
//!
//! Format, one `[Header]` section plus one section per field:
//!
//! ```ini
//! [Header]
//! TotalLength=20
//! StartCode=0203
//! StartCodeLength=2
//! CRCAlgo=CRC16
//! CRCLength=2
//!
//! [sensor.speed]
//! ByteOffset=3
//! Type=uint16
//! Endian=big
//! Scale=0.1
//! ```
//!
//! Field sections accept `ByteOffset` and `Type` (required) plus
//! `BitOffset`, `BitCount`, `Endian` (`big`/`little`), `Scale` and `Bias`.

use std::fmt;
use std::string::String;
use std::vec::Vec;

use crate::error::LayoutError;
use crate::layout::{ChecksumKind, FieldDescriptor, LayoutBuilder, LayoutConfig};

/// Errors produced by configuration loading
///
/// These surface before a [`LayoutConfig`] ever reaches the validator;
/// layout-level problems keep their own taxonomy under
/// [`ConfigError::Layout`].
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(std::io::Error),
    /// The `[Header]` section is missing
    MissingHeaderSection,
    /// A required key is missing from a section
    MissingKey {
        /// Section the key belongs to
        section: String,
        /// The missing key
        key: String,
    },
    /// A key holds a value that does not parse
    InvalidValue {
        /// Section the key belongs to
        section: String,
        /// The offending key
        key: String,
        /// The raw value text
        value: String,
    },
    /// `StartCode` and `StartCodeLength` must appear together
    UnpairedStartCode,
    /// `CRCAlgo` and `CRCLength` must appear together
    UnpairedChecksum,
    /// A line is neither a section header, a key=value pair, nor a comment
    MalformedLine {
        /// One-based line number
        line: usize,
    },
    /// Layout-level rejection (unknown type, unsupported checksum)
    Layout(LayoutError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config file unreadable: {err}"),
            ConfigError::MissingHeaderSection => f.write_str("missing [Header] section"),
            ConfigError::MissingKey { section, key } => {
                write!(f, "missing key `{key}` in section [{section}]")
            }
            ConfigError::InvalidValue {
                section,
                key,
                value,
            } => write!(f, "invalid value `{value}` for `{key}` in section [{section}]"),
            ConfigError::UnpairedStartCode => {
                f.write_str("StartCode and StartCodeLength must appear in pairs")
            }
            ConfigError::UnpairedChecksum => {
                f.write_str("CRCAlgo and CRCLength must appear in pairs")
            }
            ConfigError::MalformedLine { line } => write!(f, "malformed config line {line}"),
            ConfigError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LayoutError> for ConfigError {
    fn from(err: LayoutError) -> Self {
        ConfigError::Layout(err)
    }
}

/// One parsed `[section]` with its key=value pairs, in file order
struct Section {
    name: String,
    pairs: Vec<(String, String)>,
}

impl Section {
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey {
            section: self.name.clone(),
            key: key.into(),
        })
    }
}

/// Load a layout configuration from a file
pub fn load(path: impl AsRef<std::path::Path>) -> Result<LayoutConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_str(&text)
}

/// Parse a layout configuration from INI-style text
pub fn parse_str(text: &str) -> Result<LayoutConfig, ConfigError> {
    let sections = split_sections(text)?;
    let header = sections
        .iter()
        .find(|s| s.name == "Header")
        .ok_or(ConfigError::MissingHeaderSection)?;

    let total_length: usize = parse_value(header, "TotalLength", header.require("TotalLength")?)?;
    let mut builder = LayoutBuilder::new(total_length);

    match (header.get("StartCode"), header.get("StartCodeLength")) {
        (None, None) => {}
        (Some(code), Some(len)) => {
            let constant = hex::decode(code).map_err(|_| ConfigError::InvalidValue {
                section: header.name.clone(),
                key: "StartCode".into(),
                value: code.into(),
            })?;
            let reserved: usize = parse_value(header, "StartCodeLength", len)?;
            builder = builder.header(&constant, reserved);
        }
        _ => return Err(ConfigError::UnpairedStartCode),
    }

    match (header.get("CRCAlgo"), header.get("CRCLength")) {
        (None, None) => {}
        (Some(algo), Some(len)) => {
            let kind = ChecksumKind::parse(algo)?;
            let length: usize = parse_value(header, "CRCLength", len)?;
            builder = builder.checksum(kind, length);
        }
        _ => return Err(ConfigError::UnpairedChecksum),
    }

    for section in sections.iter().filter(|s| s.name != "Header") {
        builder = builder.field(parse_field(section)?);
    }

    Ok(builder.build())
}

/// Parse one field section into a descriptor
fn parse_field(section: &Section) -> Result<FieldDescriptor, ConfigError> {
    let byte_offset: usize = parse_value(section, "ByteOffset", section.require("ByteOffset")?)?;
    let type_name = section.require("Type")?;
    // Type-name rejection happens here, at the point of addition.
    let mut field = FieldDescriptor::with_type_name(section.name.clone(), byte_offset, type_name)?;

    if let Some(raw) = section.get("BitOffset") {
        field.bit_offset = parse_value(section, "BitOffset", raw)?;
    }
    if let Some(raw) = section.get("BitCount") {
        field.bit_count = parse_value(section, "BitCount", raw)?;
    }
    if let Some(raw) = section.get("Endian") {
        field.big_endian = match raw.to_ascii_lowercase().as_str() {
            "little" => false,
            "big" => true,
            _ => {
                return Err(ConfigError::InvalidValue {
                    section: section.name.clone(),
                    key: "Endian".into(),
                    value: raw.into(),
                })
            }
        };
    }
    if let Some(raw) = section.get("Scale") {
        field.scale = parse_value(section, "Scale", raw)?;
    }
    if let Some(raw) = section.get("Bias") {
        field.bias = parse_value(section, "Bias", raw)?;
    }

    Ok(field)
}

/// Split text into sections, preserving file order
fn split_sections(text: &str) -> Result<Vec<Section>, ConfigError> {
    let mut sections: Vec<Section> = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.push(Section {
                name: name.trim().into(),
                pairs: Vec::new(),
            });
        } else if let Some((key, value)) = line.split_once('=') {
            let section = sections
                .last_mut()
                .ok_or(ConfigError::MalformedLine { line: idx + 1 })?;
            section
                .pairs
                .push((key.trim().into(), value.trim().into()));
        } else {
            return Err(ConfigError::MalformedLine { line: idx + 1 });
        }
    }

    Ok(sections)
}

/// Parse one value with section/key context on failure
fn parse_value<T: core::str::FromStr>(
    section: &Section,
    key: &str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        section: section.name.clone(),
        key: key.into(),
        value: raw.into(),
    })
}

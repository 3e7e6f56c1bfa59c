//! Tagged decoded values
//!
//! Each decoded field yields exactly one [`Value`] case. The decoder only
//! ever produces the numeric and boolean cases; `Text` exists for the
//! presentation boundary, which may carry string renderings alongside
//! decoded readings.

use alloc::string::String;
use core::fmt;

/// Closed tagged union over the decode result kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unsigned integer, widened to 64 bits
    U64(u64),
    /// Signed integer, widened to 64 bits
    I64(i64),
    /// 64-bit float (rescaled readings and float fields)
    F64(f64),
    /// Boolean
    Bool(bool),
    /// Text (presentation only, never produced by the decoder)
    Text(String),
}

impl Value {
    /// Unsigned integer case, if that is what this value holds
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Signed integer case, if that is what this value holds
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean case, if that is what this value holds
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric reading widened to f64, for any numeric case
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::U64(v) => Some(*v as f64),
            Value::I64(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            Value::Bool(_) | Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::U64(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

//! The boundary with database drivers.
//!
//! A driver hands out untyped [`SqlValue`]s. [`Scan`] fills a typed value from
//! one and [`Valuer`] produces one to bind as a parameter.

use crate::error::ScanError;
use chrono::{DateTime, FixedOffset};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

/// A value as a database driver sees it.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(DateTime<FixedOffset>),
}

impl SqlValue {
    /// The name of the variant's Rust type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "i64",
            Self::Float(_) => "f64",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "string",
            Self::Timestamp(_) => "timestamp",
        }
    }

    /// The contents of `Bytes` or `Text`.
    pub(crate) fn as_text_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }
}

/// Text and bytes are written as their text, bytes lossily. Timestamps use
/// RFC 3339.
impl Display for SqlValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => Display::fmt(v, f),
            Self::Int(v) => Display::fmt(v, f),
            Self::Float(v) => Display::fmt(v, f),
            Self::Bytes(v) => f.write_str(&String::from_utf8_lossy(v)),
            Self::Text(v) => f.write_str(v),
            Self::Timestamp(v) => f.write_str(&v.to_rfc3339()),
        }
    }
}

impl From<DateTime<FixedOffset>> for SqlValue {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(t)
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl<'a> From<Cow<'a, str>> for SqlValue {
    fn from(s: Cow<'a, str>) -> Self {
        Self::Text(s.into_owned())
    }
}

/// Fills `self` from a value read from the database.
pub trait Scan {
    /// Replaces `self` with the contents of `src`. On error `self` is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// When `src` has a type that can't be converted or its text doesn't
    /// parse. The message starts with [`SCAN_FAILED`](crate::SCAN_FAILED).
    fn scan(&mut self, src: &SqlValue) -> Result<(), ScanError>;
}

/// Produces the value to store in the database.
pub trait Valuer {
    fn value(&self) -> SqlValue;
}

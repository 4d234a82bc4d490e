use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// The text every [`ScanError`] message starts with.
pub const SCAN_FAILED: &str = "scan failed";

/// A value did not match a layout.
///
/// The message names the whole input and, where one element failed, the
/// unconsumed input at that element along with the element itself:
///
/// ```
/// let err = datestamp::layout::parse("2006-01-02", b"2020-1-01").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     r#"parsing time "2020-1-01" as "2006-01-02": cannot parse "1-01" as "01""#,
/// );
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// An element of the layout could not consume the input.
    #[error(
        "parsing time {} as {}: cannot parse {} as {}",
        quoted(.value),
        quoted(.layout),
        quoted(.value_elem),
        quoted(.layout_elem)
    )]
    Mismatch {
        layout: String,
        value: Vec<u8>,
        layout_elem: String,
        value_elem: Vec<u8>,
    },
    /// The input matched the layout's shape but its contents were invalid,
    /// e.g. a month of 13 or trailing text.
    #[error("parsing time {}: {message}", quoted(.value))]
    Invalid {
        layout: String,
        value: Vec<u8>,
        message: String,
    },
}

impl ParseError {
    pub(crate) fn mismatch(layout: &str, value: &[u8], layout_elem: &str, value_elem: &[u8]) -> Self {
        Self::Mismatch {
            layout: layout.to_owned(),
            value: value.to_vec(),
            layout_elem: layout_elem.to_owned(),
            value_elem: value_elem.to_vec(),
        }
    }

    pub(crate) fn invalid(layout: &str, value: &[u8], message: impl Into<String>) -> Self {
        Self::Invalid {
            layout: layout.to_owned(),
            value: value.to_vec(),
            message: message.into(),
        }
    }

    /// The layout the input was parsed against.
    pub fn layout(&self) -> &str {
        match self {
            Self::Mismatch { layout, .. } | Self::Invalid { layout, .. } => layout,
        }
    }

    /// The complete input that failed to parse.
    pub fn value(&self) -> &[u8] {
        match self {
            Self::Mismatch { value, .. } | Self::Invalid { value, .. } => value,
        }
    }
}

/// Writes bytes in double quotes, escaping quotes and backslashes with a
/// backslash and bytes outside printable ASCII as `\xNN`.
pub(crate) struct Quoted<'a>(pub &'a [u8]);

pub(crate) fn quoted<T: AsRef<[u8]> + ?Sized>(s: &T) -> Quoted<'_> {
    Quoted(s.as_ref())
}

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for &b in self.0 {
            match b {
                b'"' | b'\\' => write!(f, "\\{}", b as char)?,
                b' '..=0x7f => write!(f, "{}", b as char)?,
                _ => write!(f, "\\x{b:02x}")?,
            }
        }
        f.write_str("\"")
    }
}

/// What went wrong in a [`ScanError`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// The source value has a type that can't be scanned.
    UnsupportedType { type_name: &'static str },
    /// The source value is text that didn't match the layout.
    Parse(ParseError),
}

/// Returned by [`Scan::scan`](crate::Scan::scan).
///
/// The message always starts with [`SCAN_FAILED`]. For parse failures the
/// [`ParseError`] is also available through [`std::error::Error::source`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("scan failed: {message}")]
pub struct ScanError {
    kind: ScanErrorKind,
    message: String,
    #[source]
    source: Option<ParseError>,
}

impl ScanError {
    pub(crate) fn unsupported_type(type_name: &'static str, target: &str) -> Self {
        Self {
            kind: ScanErrorKind::UnsupportedType { type_name },
            message: format!("cannot unmarshal variable of type {type_name} into {target}"),
            source: None,
        }
    }

    /// Wraps `err` with `context` describing what was being unmarshaled into
    /// what, e.g. `cannot unmarshal 2020-13-01 into Date`.
    pub(crate) fn parse(context: impl Display, err: ParseError) -> Self {
        Self {
            kind: ScanErrorKind::Parse(err.clone()),
            message: format!("{context}: {err}"),
            source: Some(err),
        }
    }

    /// The reason the scan failed.
    pub fn kind(&self) -> &ScanErrorKind {
        &self.kind
    }
}

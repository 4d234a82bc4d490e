//! Timestamps with a text form chosen by a type parameter.
//!
//! [`FormattedTime<F>`] holds a full timestamp and uses the layout of its
//! descriptor `F` wherever text is involved: [`Display`], [`FromStr`],
//! marshaling and scanning. Each descriptor makes a distinct type, so values
//! with different formats can't be mixed up:
//!
//! ```compile_fail
//! use datestamp::{FormattedTime, Iso8601Date, Rfc3339};
//!
//! let a: FormattedTime<Rfc3339> = Default::default();
//! let b: FormattedTime<Iso8601Date> = a;
//! ```
//!
//! Descriptors are unit structs implementing [`TimeFormat`]. The common ones
//! are built in and others are one `impl` (or one derive) away:
//!
//! ```
//! use datestamp::{FormattedTime, TimeFormat};
//!
//! struct Compact;
//!
//! impl TimeFormat for Compact {
//!     const LAYOUT: &'static str = "20060102T150405";
//! }
//!
//! let t: FormattedTime<Compact> = "20240309T170500".parse().unwrap();
//! assert_eq!(t.time().to_rfc3339(), "2024-03-09T17:05:00+00:00");
//! ```

mod formats;

pub use formats::*;

use crate::error::{ParseError, ScanError};
use crate::value::{Scan, SqlValue, Valuer};
use crate::{civil, layout};
use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// Names the layout of a [`FormattedTime`].
///
/// See [`crate::layout`] for how layouts are written.
pub trait TimeFormat {
    const LAYOUT: &'static str;
}

/// The last path segment of `F`'s type name, e.g. `Rfc3339`.
fn descriptor_name<F>() -> &'static str {
    let name = std::any::type_name::<F>();
    let end = name.find('<').unwrap_or(name.len());
    let start = name[..end].rfind("::").map_or(0, |i| i + 2);
    &name[start..]
}

/// A timestamp whose text form is `F`'s layout.
///
/// The offset and full precision of the timestamp are kept; only the text
/// form is limited to what the layout shows. Two values are equal when they
/// are the same instant in the same offset.
pub struct FormattedTime<F> {
    time: DateTime<FixedOffset>,
    format: PhantomData<fn() -> F>,
}

impl<F> FormattedTime<F> {
    pub fn from_time<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self {
            time: t.fixed_offset(),
            format: PhantomData,
        }
    }

    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }
}

impl<F: TimeFormat> FormattedTime<F> {
    pub fn layout(&self) -> &'static str {
        F::LAYOUT
    }

    pub fn marshal_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Replaces `self` with the timestamp in `data`. Layouts without an
    /// offset or zone give UTC.
    ///
    /// # Errors
    ///
    /// If `data` doesn't match `F::LAYOUT`. `self` is unchanged on error.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<(), ParseError> {
        *self = Self::from_time(layout::parse(F::LAYOUT, data)?);
        Ok(())
    }
}

impl<F> Clone for FormattedTime<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for FormattedTime<F> {}

impl<F> PartialEq for FormattedTime<F> {
    fn eq(&self, other: &Self) -> bool {
        // `DateTime` equality ignores the offset.
        self.time == other.time && self.time.offset() == other.time.offset()
    }
}

impl<F> Eq for FormattedTime<F> {}

impl<F> Hash for FormattedTime<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.time.naive_utc().hash(state);
        self.time.offset().local_minus_utc().hash(state);
    }
}

/// `0001-01-01T00:00:00Z`.
impl<F> Default for FormattedTime<F> {
    fn default() -> Self {
        Self::from_time(civil::datetime(1, 1, 1, 0, 0, 0, 0, civil::utc()))
    }
}

impl<F: TimeFormat> Display for FormattedTime<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(F::LAYOUT.len() + 10);
        layout::format_into(&mut out, &self.time, F::LAYOUT);
        f.pad(&out)
    }
}

impl<F: TimeFormat> Debug for FormattedTime<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FormattedTime[{}]({self})", descriptor_name::<F>())
    }
}

impl<F: TimeFormat> FromStr for FormattedTime<F> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut t = Self::default();
        t.unmarshal_text(s.as_bytes())?;
        Ok(t)
    }
}

impl<F: TimeFormat> Scan for FormattedTime<F> {
    fn scan(&mut self, src: &SqlValue) -> Result<(), ScanError> {
        trace!(
            "scanning {} into FormattedTime[{}]",
            src.type_name(),
            descriptor_name::<F>()
        );
        if let SqlValue::Timestamp(t) = src {
            *self = Self::from_time(*t);
            return Ok(());
        }
        let Some(text) = src.as_text_bytes() else {
            return Err(ScanError::unsupported_type(src.type_name(), "FormattedTime"));
        };
        self.unmarshal_text(text).map_err(|err| {
            let name = descriptor_name::<F>();
            debug!("cannot scan {src} into FormattedTime[{name}]: {err}");
            ScanError::parse(
                format_args!("unable to unmarshal {src} into FormattedTime[{name}]"),
                err,
            )
        })
    }
}

impl<F> Valuer for FormattedTime<F> {
    fn value(&self) -> SqlValue {
        SqlValue::Timestamp(self.time)
    }
}

impl<F> From<FormattedTime<F>> for SqlValue {
    fn from(t: FormattedTime<F>) -> Self {
        t.value()
    }
}

impl<F: TimeFormat> TryFrom<&SqlValue> for FormattedTime<F> {
    type Error = ScanError;

    fn try_from(src: &SqlValue) -> Result<Self, Self::Error> {
        let mut t = Self::default();
        t.scan(src)?;
        Ok(t)
    }
}

impl<F, Tz: TimeZone> From<DateTime<Tz>> for FormattedTime<F> {
    fn from(t: DateTime<Tz>) -> Self {
        Self::from_time(t)
    }
}

impl<F> From<FormattedTime<F>> for DateTime<FixedOffset> {
    fn from(t: FormattedTime<F>) -> Self {
        t.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanErrorKind;
    use chrono::{Timelike, Utc};
    use std::collections::HashSet;

    struct Custom;

    impl TimeFormat for Custom {
        const LAYOUT: &'static str = "Jan _2 15:04:05.000 -0700";
    }

    fn instant() -> DateTime<FixedOffset> {
        civil::datetime(2024, 5, 6, 7, 8, 9, 123_456_789, civil::offset(2 * 3600))
    }

    #[test]
    fn descriptor_names() {
        assert_eq!(descriptor_name::<Rfc3339>(), "Rfc3339");
        assert_eq!(descriptor_name::<Custom>(), "Custom");
    }

    #[test]
    fn default_is_zero_time() {
        let t = FormattedTime::<Rfc3339>::default();
        assert_eq!(t.to_string(), "0001-01-01T00:00:00Z");
        assert_eq!(t.time(), civil::datetime(1, 1, 1, 0, 0, 0, 0, civil::utc()));
    }

    #[test]
    fn equality_sees_offset_and_precision() {
        let a = FormattedTime::<Rfc3339>::from(instant());
        let same_instant = FormattedTime::<Rfc3339>::from(instant().with_timezone(&Utc));
        assert_eq!(a.time(), same_instant.time());
        assert_ne!(a, same_instant);
        assert_eq!(a.to_string(), "2024-05-06T07:08:09+02:00");
        assert_eq!(same_instant.to_string(), "2024-05-06T05:08:09Z");

        let truncated: FormattedTime<Rfc3339> = a.to_string().parse().unwrap();
        assert_ne!(a, truncated);
        assert_eq!(a.time().with_nanosecond(0), Some(truncated.time()));

        let set: HashSet<_> = [a, a, same_instant, truncated].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn debug() {
        let t = FormattedTime::<Rfc3339>::from(instant());
        assert_eq!(format!("{t:?}"), "FormattedTime[Rfc3339](2024-05-06T07:08:09+02:00)");
        let t = FormattedTime::<Custom>::from(instant());
        assert_eq!(format!("{t:?}"), "FormattedTime[Custom](May  6 07:08:09.123 +0200)");
    }

    #[test]
    fn custom_layout_keeps_offset() {
        let mut t = FormattedTime::<Custom>::default();
        t.unmarshal_text(b"Dec 31 23:59:59.999 -0130").unwrap();
        assert_eq!(t.layout(), Custom::LAYOUT);
        assert_eq!(t.time().offset().local_minus_utc(), -5400);
        assert_eq!(t.time().nanosecond(), 999_000_000);
        assert_eq!(t.marshal_text(), b"Dec 31 23:59:59.999 -0130");
    }

    #[test]
    fn layout_without_zone_parses_as_utc() {
        let t: FormattedTime<YearMonthDayTime> = "2020-02-29 12:00:00".parse().unwrap();
        assert_eq!(t.time().to_rfc3339(), "2020-02-29T12:00:00+00:00");
    }

    #[test]
    fn unmarshal_text_leaves_self_on_error() {
        let mut t = FormattedTime::<MonthDayYear>::from(instant());
        let err = t.unmarshal_text(b"13/01/2020").unwrap_err();
        assert_eq!(err.to_string(), r#"parsing time "13/01/2020": month out of range"#);
        assert_eq!(t, FormattedTime::from(instant()));
    }

    #[test]
    fn value_keeps_everything() {
        let t = FormattedTime::<Iso8601Date>::from(instant());
        assert_eq!(t.to_string(), "2024-05-06");
        assert_eq!(t.value(), SqlValue::Timestamp(instant()));
        assert_eq!(SqlValue::from(t), SqlValue::Timestamp(instant()));
        assert_eq!(DateTime::<FixedOffset>::from(t), instant());
    }

    #[test]
    fn scan() {
        let want = FormattedTime::<DayMonthYear>::from(civil::datetime(
            2020, 1, 2, 0, 0, 0, 0, civil::utc(),
        ));
        for src in [
            SqlValue::from("02/01/2020"),
            SqlValue::from(b"02/01/2020".to_vec()),
            want.value(),
        ] {
            let mut t = FormattedTime::<DayMonthYear>::default();
            t.scan(&src).unwrap();
            assert_eq!(t, want);
            assert_eq!(FormattedTime::try_from(&src), Ok(want));
        }

        let mut t = FormattedTime::<Rfc3339>::from(instant());
        t.scan(&SqlValue::Timestamp(instant())).unwrap();
        assert_eq!(t.time().nanosecond(), 123_456_789);
    }

    #[test]
    fn scan_errors() {
        let mut t = FormattedTime::<Rfc3339>::default();
        let err = t.scan(&SqlValue::Int(7)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "scan failed: cannot unmarshal variable of type i64 into FormattedTime"
        );
        assert_eq!(err.kind(), &ScanErrorKind::UnsupportedType { type_name: "i64" });

        let err = t.scan(&SqlValue::from("2020-01-01")).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"scan failed: unable to unmarshal 2020-01-01 into FormattedTime[Rfc3339]: parsing time "2020-01-01" as "2006-01-02T15:04:05Z07:00": cannot parse "" as "T""#
        );
        assert!(matches!(err.kind(), ScanErrorKind::Parse(_)));
        assert_eq!(t, FormattedTime::default());
    }
}

use crate::error::{ParseError, ScanError};
use crate::value::{Scan, SqlValue, Valuer};
use crate::{civil, layout};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

/// A calendar date without a time of day or a time zone.
///
/// Two dates are equal when they name the same day. The text form is always
/// `YYYY-MM-DD`, see [`Date::LAYOUT`].
///
/// ```
/// use datestamp::Date;
///
/// let d = Date::new(2020, 2, 30);
/// assert_eq!(d.to_string(), "2020-03-01");
/// assert_eq!("2020-03-01".parse::<Date>().unwrap(), d);
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// The layout used for every text conversion.
    pub const LAYOUT: &'static str = "2006-01-02";

    /// Makes the date `year-month-day`.
    ///
    /// Out-of-range months and days roll over into the neighboring years and
    /// months instead of failing, so `Date::new(2020, 13, 1)` is 2021-01-01
    /// and `Date::new(2020, 3, 0)` is 2020-02-29.
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self(civil::date(year.into(), month.into(), day.into()))
    }

    /// The calendar date of `t` in its own time zone.
    pub fn from_time<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self(t.date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// From 1 to 12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Midnight UTC at the start of the date.
    pub fn time(&self) -> DateTime<Utc> {
        civil::midnight(self.0).with_timezone(&Utc)
    }

    /// The text form, the same as [`Display`].
    pub fn marshal_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Replaces `self` with the date in `data`, which must be `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// If `data` doesn't match [`Date::LAYOUT`] or isn't a real date. `self`
    /// is unchanged on error.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<(), ParseError> {
        *self = Self::from_time(&layout::parse(Self::LAYOUT, data)?);
        Ok(())
    }
}

/// `0001-01-01`.
impl Default for Date {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(10);
        layout::format_into(&mut out, &civil::midnight(self.0), Self::LAYOUT);
        f.pad(&out)
    }
}

/// Writes the constructor call that makes the same date.
impl Debug for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Date::new({}, {}, {})", self.year(), self.month(), self.day())
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut d = Self::default();
        d.unmarshal_text(s.as_bytes())?;
        Ok(d)
    }
}

impl Scan for Date {
    /// Accepts `Text` and `Bytes` in the text form and `Timestamp`, whose
    /// date in its own offset is kept.
    fn scan(&mut self, src: &SqlValue) -> Result<(), ScanError> {
        trace!("scanning {} into Date", src.type_name());
        if let SqlValue::Timestamp(t) = src {
            *self = Self::from_time(t);
            return Ok(());
        }
        let Some(text) = src.as_text_bytes() else {
            return Err(ScanError::unsupported_type(src.type_name(), "Date"));
        };
        self.unmarshal_text(text).map_err(|err| {
            debug!("cannot scan {src} into Date: {err}");
            ScanError::parse(format_args!("cannot unmarshal {src} into Date"), err)
        })
    }
}

impl Valuer for Date {
    /// Midnight UTC at the start of the date.
    fn value(&self) -> SqlValue {
        SqlValue::Timestamp(civil::midnight(self.0))
    }
}

impl From<Date> for SqlValue {
    fn from(d: Date) -> Self {
        d.value()
    }
}

impl TryFrom<&SqlValue> for Date {
    type Error = ScanError;

    fn try_from(src: &SqlValue) -> Result<Self, Self::Error> {
        let mut d = Self::default();
        d.scan(src)?;
        Ok(d)
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl From<NaiveDateTime> for Date {
    fn from(t: NaiveDateTime) -> Self {
        Self(t.date())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Date {
    fn from(t: DateTime<Tz>) -> Self {
        Self::from_time(&t)
    }
}

impl From<Date> for NaiveDate {
    fn from(d: Date) -> Self {
        d.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanErrorKind;
    use crate::SCAN_FAILED;
    use chrono::{FixedOffset, Timelike};
    use std::error::Error as _;

    fn zero() -> DateTime<FixedOffset> {
        civil::datetime(1, 1, 1, 0, 0, 0, 0, civil::utc())
    }

    #[test]
    fn default_is_zero_time() {
        assert_eq!(Date::default().to_string(), "0001-01-01");
        assert_eq!(Date::default(), Date::from_time(&zero()));
        assert_eq!(Date::default().time(), zero());
    }

    #[test]
    fn from_time_matches_layout() {
        let times = [
            zero(),
            civil::datetime(0, 0, 0, 0, 0, 0, 0, civil::utc()),
            civil::datetime(-1, 0, 0, 0, 0, 0, 0, civil::utc()),
            civil::datetime(0, -1, 0, 0, 0, 0, 0, civil::utc()),
            civil::datetime(0, 0, -1, 0, 0, 0, 0, civil::utc()),
            civil::datetime(2020, 6, 1, 23, 30, 0, 0, civil::offset(-5 * 3600)),
            Utc::now().fixed_offset(),
        ];
        for t in times {
            assert_eq!(
                Date::from_time(&t).to_string(),
                layout::format(&t, Date::LAYOUT),
                "{t:?}"
            );
        }
    }

    #[test]
    fn from_time_keeps_local_date() {
        let late = civil::datetime(2020, 6, 1, 23, 30, 0, 0, civil::offset(-5 * 3600));
        assert_eq!(Date::from(late), Date::new(2020, 6, 1));
        assert_eq!(Date::from(late.with_timezone(&Utc)), Date::new(2020, 6, 2));
        assert_eq!(Date::from(late.naive_local()), Date::new(2020, 6, 1));
    }

    #[test]
    fn new_normalizes() {
        assert_eq!(Date::new(-1, -1, -1).to_string(), "-0002-10-30");
        assert_eq!(Date::new(2020, 13, 1).to_string(), "2021-01-01");
        assert_eq!(Date::new(2021, 2, 29).to_string(), "2021-03-01");
        assert_eq!(Date::new(10000, 1, 1).to_string(), "10000-01-01");
        assert_eq!(Date::new(7, 1, 1).to_string(), "0007-01-01");

        for (y, m, d) in crate::random_data::<(i16, i8, i8)>(1000) {
            let (y, m, d) = (i32::from(y), i32::from(m), i32::from(d));
            let n = civil::date(y.into(), m.into(), d.into());
            let sign = if n.year() < 0 { "-" } else { "" };
            let abs = n.year().unsigned_abs();
            let want = format!("{sign}{abs:04}-{:02}-{:02}", n.month(), n.day());
            assert_eq!(Date::new(y, m, d).to_string(), want, "Date::new({y}, {m}, {d})");
        }
    }

    #[test]
    fn accessors() {
        let d = Date::new(1996, 2, 14);
        assert_eq!((d.year(), d.month(), d.day()), (1996, 2, 14));
        assert_eq!(d.naive(), NaiveDate::from_ymd_opt(1996, 2, 14).unwrap());
        let t = d.time();
        assert_eq!((t.hour(), t.minute(), t.second(), t.nanosecond()), (0, 0, 0, 0));
    }

    #[test]
    fn debug_is_constructor() {
        assert_eq!(format!("{:?}", Date::from_time(&zero())), "Date::new(1, 1, 1)");
        assert_eq!(format!("{:?}", Date::new(-1, -1, -1)), "Date::new(-2, 10, 30)");
    }

    #[test]
    fn display_pads() {
        assert_eq!(format!("[{:>12}]", Date::new(2020, 1, 2)), "[  2020-01-02]");
    }

    #[test]
    fn text_round_trip() {
        for (y, ord) in crate::random_data::<(u16, u16)>(1000) {
            let d = Date::new(i32::from(y % 10000), 1, i32::from(ord % 366) + 1);
            let mut parsed = Date::default();
            parsed.unmarshal_text(&d.marshal_text()).unwrap();
            assert_eq!(parsed, d);
            assert_eq!(d.to_string().parse::<Date>(), Ok(d));
        }
    }

    #[test]
    fn unmarshal_text_errors_are_raw() {
        let mut d = Date::new(2000, 1, 1);
        let err = d.unmarshal_text(b"2020-02-30").unwrap_err();
        assert_eq!(err.to_string(), r#"parsing time "2020-02-30": day out of range"#);
        let err = d.unmarshal_text(b"2020-01-01 ").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"parsing time "2020-01-01 ": extra text: " ""#
        );
        assert_eq!(d, Date::new(2000, 1, 1));
        assert!("20200101".parse::<Date>().is_err());
    }

    #[test]
    fn value() {
        let v = Date::new(2020, 3, 1).value();
        let want = civil::datetime(2020, 3, 1, 0, 0, 0, 0, civil::utc());
        assert_eq!(v, SqlValue::Timestamp(want));
        assert_eq!(SqlValue::from(Date::new(2020, 3, 1)), v);
        assert_eq!(Date::new(1996, 2, 14).value().to_string(), "1996-02-14T00:00:00+00:00");
    }

    #[test]
    fn scan_text_bytes_and_timestamp_agree() {
        let expected = Date::new(1996, 2, 14);
        let sources = [
            SqlValue::from("1996-02-14"),
            SqlValue::from(b"1996-02-14".to_vec()),
            SqlValue::Timestamp(civil::datetime(1996, 2, 14, 0, 0, 0, 0, civil::utc())),
            SqlValue::Timestamp(civil::datetime(1996, 2, 14, 22, 0, 0, 0, civil::offset(-8 * 3600))),
            expected.value(),
        ];
        for src in sources {
            let mut actual = Date::default();
            actual.scan(&src).unwrap();
            assert_eq!(actual, expected, "{src:?}");
            assert_eq!(Date::try_from(&src), Ok(expected));
        }
    }

    #[test]
    fn scan_unsupported_type() {
        let mut d = Date::new(2000, 1, 1);
        let err = d.scan(&SqlValue::Bool(true)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "scan failed: cannot unmarshal variable of type bool into Date"
        );
        assert_eq!(err.kind(), &ScanErrorKind::UnsupportedType { type_name: "bool" });
        assert!(err.source().is_none());

        for src in [SqlValue::Null, SqlValue::Int(0), SqlValue::Float(0.0)] {
            let err = d.scan(&src).unwrap_err();
            assert!(err.to_string().starts_with(SCAN_FAILED), "{err}");
        }
        assert_eq!(d, Date::new(2000, 1, 1));
    }

    #[test]
    fn scan_malformed() {
        let mut d = Date::new(2000, 1, 1);
        for src in [SqlValue::from("213-4=vdf&"), SqlValue::from(b"213-4=vdf&".to_vec())] {
            let err = d.scan(&src).unwrap_err();
            assert_eq!(
                err.to_string(),
                r#"scan failed: cannot unmarshal 213-4=vdf& into Date: parsing time "213-4=vdf&" as "2006-01-02": cannot parse "4=vdf&" as "2006""#
            );
            let ScanErrorKind::Parse(parse) = err.kind() else {
                panic!("{:?}", err.kind());
            };
            assert_eq!(parse.value(), b"213-4=vdf&");
            assert_eq!(err.source().map(|e| e.to_string()), Some(parse.to_string()));
        }
        assert_eq!(d, Date::new(2000, 1, 1));
    }
}

use crate::{civil, Date, FormattedTime, SqlValue};
use chrono::{DateTime, FixedOffset};
use time::OffsetDateTime;

fn to_chrono(t: OffsetDateTime) -> DateTime<FixedOffset> {
    civil::datetime(
        t.year().into(),
        u8::from(t.month()).into(),
        t.day().into(),
        t.hour().into(),
        t.minute().into(),
        t.second().into(),
        t.nanosecond().into(),
        civil::offset(t.offset().whole_seconds().into()),
    )
}

/// The date in `t`'s own offset.
impl From<OffsetDateTime> for Date {
    fn from(t: OffsetDateTime) -> Self {
        t.date().into()
    }
}

impl From<time::Date> for Date {
    fn from(d: time::Date) -> Self {
        Self::from(civil::date(
            d.year().into(),
            u8::from(d.month()).into(),
            d.day().into(),
        ))
    }
}

impl<F> From<OffsetDateTime> for FormattedTime<F> {
    fn from(t: OffsetDateTime) -> Self {
        Self::from_time(to_chrono(t))
    }
}

impl From<OffsetDateTime> for SqlValue {
    fn from(t: OffsetDateTime) -> Self {
        Self::Timestamp(to_chrono(t))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Date, FormattedTime, Rfc3339, SqlValue};
    use time::macros::{date, datetime};

    #[test]
    fn date() {
        assert_eq!(Date::from(date!(1996-02-14)), Date::new(1996, 2, 14));
        let d = time::Date::from_calendar_date(-2, time::Month::October, 30).unwrap();
        assert_eq!(Date::from(d).to_string(), "-0002-10-30");
        // The local date, not the UTC one.
        let t = datetime!(2020-06-01 23:30 -5);
        assert_eq!(Date::from(t), Date::new(2020, 6, 1));
    }

    #[test]
    fn formatted_time() {
        let t = datetime!(2024-05-06 07:08:09.123456789 +05:30);
        let f = FormattedTime::<Rfc3339>::from(t);
        assert_eq!(f.to_string(), "2024-05-06T07:08:09+05:30");
        assert_eq!(f.time().timestamp_subsec_nanos(), 123_456_789);
        assert_eq!(f.time().timestamp(), t.unix_timestamp());
        assert_eq!(SqlValue::from(t), SqlValue::Timestamp(f.time()));
    }
}

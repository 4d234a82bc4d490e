use crate::{civil, Date, FormattedTime};
use jiff::{Timestamp, Zoned};

impl From<jiff::civil::Date> for Date {
    fn from(d: jiff::civil::Date) -> Self {
        Self::from(civil::date(d.year().into(), d.month().into(), d.day().into()))
    }
}

/// The date in `z`'s own time zone.
impl From<Zoned> for Date {
    fn from(z: Zoned) -> Self {
        z.date().into()
    }
}

/// Keeps the offset `z` has at its instant. The time zone's name and rules
/// are dropped.
impl<F> From<Zoned> for FormattedTime<F> {
    fn from(z: Zoned) -> Self {
        let dt = z.datetime();
        Self::from_time(civil::datetime(
            dt.year().into(),
            dt.month().into(),
            dt.day().into(),
            dt.hour().into(),
            dt.minute().into(),
            dt.second().into(),
            dt.subsec_nanosecond().into(),
            civil::offset(z.offset().seconds().into()),
        ))
    }
}

/// In UTC.
impl<F> From<Timestamp> for FormattedTime<F> {
    fn from(ts: Timestamp) -> Self {
        Self::from_time(civil::datetime(
            1970,
            1,
            1,
            0,
            0,
            ts.as_second(),
            ts.subsec_nanosecond().into(),
            civil::utc(),
        ))
    }
}

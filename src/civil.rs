//! Normalizing construction of dates and timestamps.
//!
//! `chrono` rejects out-of-range components. The constructors here instead
//! carry overflow and underflow into the adjacent field the way a calendar
//! rolls over: month 13 is January of the next year, day 0 is the last day of
//! the previous month, hour -1 is 23:00 of the previous day and so on. They
//! never fail. Results beyond what `chrono` can represent saturate to
//! [`NaiveDate::MIN`] or [`NaiveDate::MAX`].

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};

/// Splits `lo` into whole multiples of `base` carried into `hi` and a
/// remainder in `0..base`.
#[inline(always)]
fn norm(hi: i64, lo: i64, base: i64) -> (i64, i64) {
    (hi.saturating_add(lo.div_euclid(base)), lo.rem_euclid(base))
}

fn saturate(forward: bool) -> NaiveDate {
    warn!(
        "normalized date is outside the supported range, saturating to {}",
        if forward { "the maximum" } else { "the minimum" }
    );
    if forward {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    }
}

/// Returns the calendar date `year-month-day`, normalizing out-of-range
/// months and days.
///
/// ```
/// use datestamp::civil;
///
/// assert_eq!(civil::date(2020, 13, 1).to_string(), "2021-01-01");
/// assert_eq!(civil::date(2020, 3, 0).to_string(), "2020-02-29");
/// ```
pub fn date(year: i64, month: i64, day: i64) -> NaiveDate {
    let (year, month0) = norm(year, month.saturating_sub(1), 12);
    let Some(first) = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1))
    else {
        return saturate(year > 0);
    };
    let days = day.saturating_sub(1);
    TimeDelta::try_days(days)
        .and_then(|delta| first.checked_add_signed(delta))
        .unwrap_or_else(|| saturate(days > 0))
}

/// Returns the instant with the given wall clock reading in `offset`,
/// normalizing every out-of-range component.
///
/// Nanoseconds carry into seconds, seconds into minutes, minutes into hours,
/// hours into days and then the date is normalized by [`date`].
#[allow(clippy::too_many_arguments)]
pub fn datetime(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    nanosecond: i64,
    offset: FixedOffset,
) -> DateTime<FixedOffset> {
    let (second, nanosecond) = norm(second, nanosecond, 1_000_000_000);
    let (minute, second) = norm(minute, second, 60);
    let (hour, minute) = norm(hour, minute, 60);
    let (day, hour) = norm(day, hour, 24);

    // Every component is in range after the carries above.
    let time = NaiveTime::from_hms_nano_opt(
        hour as u32,
        minute as u32,
        second as u32,
        nanosecond as u32,
    )
    .unwrap_or_default();
    let local = date(year, month, day).and_time(time);
    offset
        .from_local_datetime(&local)
        .single()
        .unwrap_or_else(|| {
            warn!("{local} at offset {offset} is outside the supported range");
            DateTime::from_naive_utc_and_offset(local, offset)
        })
}

/// Returns a fixed offset `seconds` east of UTC, clamped to less than a day
/// in either direction.
pub fn offset(seconds: i64) -> FixedOffset {
    let seconds = seconds.clamp(-86_399, 86_399) as i32;
    FixedOffset::east_opt(seconds).unwrap_or_else(utc)
}

/// The zero offset.
pub fn utc() -> FixedOffset {
    Utc.fix()
}

/// UTC midnight at the start of `date`.
pub(crate) fn midnight(date: NaiveDate) -> DateTime<FixedOffset> {
    NaiveDateTime::new(date, NaiveTime::default())
        .and_utc()
        .fixed_offset()
}

use super::element::{next_chunk, Element, OffsetStyle};
use super::{DAY_NAMES, MONTH_NAMES};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};

/// Appends `value` zero-padded to at least `width` digits. Negative values
/// get a `-` in front of the padded magnitude.
fn push_int(out: &mut String, value: i64, width: usize) {
    if value < 0 {
        out.push('-');
    }
    let digits = value.unsigned_abs().to_string();
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(&digits);
}

fn push_fraction(out: &mut String, nanosecond: u32, digits: usize, trim: bool, separator: u8) {
    if trim && (digits == 0 || nanosecond == 0) {
        return;
    }
    let start = out.len();
    out.push(separator as char);
    let mut nanos = format!("{nanosecond:09}");
    nanos.truncate(digits.min(9));
    out.push_str(&nanos);
    if trim {
        let kept = out.trim_end_matches('0').len();
        out.truncate(kept.max(start + 1));
        if out.len() == start + 1 {
            out.truncate(start);
        }
    }
}

fn push_offset(out: &mut String, seconds: i32, style: OffsetStyle, z: bool) {
    if z && seconds == 0 {
        out.push('Z');
        return;
    }
    out.push(if seconds < 0 { '-' } else { '+' });
    let seconds = i64::from(seconds.unsigned_abs());
    let (hours, minutes) = (seconds / 3600, seconds / 60 % 60);
    push_int(out, hours, 2);
    match style {
        OffsetStyle::Hours => {}
        OffsetStyle::HoursMinutes => push_int(out, minutes, 2),
        OffsetStyle::HoursColonMinutes => {
            out.push(':');
            push_int(out, minutes, 2);
        }
        OffsetStyle::HoursMinutesSeconds => {
            push_int(out, minutes, 2);
            push_int(out, seconds % 60, 2);
        }
        OffsetStyle::HoursColonMinutesColonSeconds => {
            out.push(':');
            push_int(out, minutes, 2);
            out.push(':');
            push_int(out, seconds % 60, 2);
        }
    }
}

/// Writes `t` according to `layout` in `t`'s own offset.
pub(crate) fn format_into(out: &mut String, t: &DateTime<FixedOffset>, mut layout: &str) {
    let year = i64::from(t.year());
    let month = t.month() as usize;
    let day = i64::from(t.day());
    let hour = i64::from(t.hour());
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    // Leap seconds are folded into the last nanosecond of their minute.
    let nanosecond = t.nanosecond().min(999_999_999);
    let offset = t.offset().local_minus_utc();

    loop {
        let chunk = next_chunk(layout);
        out.push_str(chunk.prefix);
        let Some(element) = chunk.element else {
            return;
        };
        layout = chunk.suffix;

        match element {
            Element::LongYear => push_int(out, year, 4),
            // Truncating remainder so negative years keep their sign.
            Element::Year => push_int(out, year % 100, 2),
            Element::LongMonth => out.push_str(MONTH_NAMES[month - 1]),
            Element::Month => out.push_str(&MONTH_NAMES[month - 1][..3]),
            Element::NumMonth => push_int(out, month as i64, 0),
            Element::ZeroMonth => push_int(out, month as i64, 2),
            Element::LongWeekday => {
                out.push_str(DAY_NAMES[t.weekday().num_days_from_sunday() as usize])
            }
            Element::Weekday => {
                out.push_str(&DAY_NAMES[t.weekday().num_days_from_sunday() as usize][..3])
            }
            Element::Day => push_int(out, day, 0),
            Element::UnderDay => {
                if day < 10 {
                    out.push(' ');
                }
                push_int(out, day, 0);
            }
            Element::ZeroDay => push_int(out, day, 2),
            Element::UnderYearDay => {
                let yday = i64::from(t.ordinal());
                if yday < 100 {
                    out.push(' ');
                    if yday < 10 {
                        out.push(' ');
                    }
                }
                push_int(out, yday, 0);
            }
            Element::ZeroYearDay => push_int(out, i64::from(t.ordinal()), 3),
            Element::Hour => push_int(out, hour, 2),
            Element::Hour12 => push_int(out, hour12, 0),
            Element::ZeroHour12 => push_int(out, hour12, 2),
            Element::Minute => push_int(out, i64::from(t.minute()), 0),
            Element::ZeroMinute => push_int(out, i64::from(t.minute()), 2),
            Element::Second => push_int(out, i64::from(t.second()), 0),
            Element::ZeroSecond => push_int(out, i64::from(t.second()), 2),
            Element::UpperMeridiem => out.push_str(if hour >= 12 { "PM" } else { "AM" }),
            Element::LowerMeridiem => out.push_str(if hour >= 12 { "pm" } else { "am" }),
            Element::ZoneName => {
                // Fixed offsets carry no abbreviation, so only UTC gets a name.
                if offset == 0 {
                    out.push_str("UTC");
                } else {
                    push_offset(out, offset, OffsetStyle::HoursMinutes, false);
                }
            }
            Element::Offset { style, z } => push_offset(out, offset, style, z),
            Element::Fraction {
                digits,
                trim,
                separator,
            } => push_fraction(out, nanosecond, digits, trim, separator),
        }
    }
}

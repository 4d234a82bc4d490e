use super::element::{next_chunk, Element, OffsetStyle};
use super::{DAY_NAMES, MONTH_NAMES};
use crate::{civil, error::ParseError, error::Quoted};
use chrono::{DateTime, FixedOffset};

/// Why a single element failed.
enum Failure<'v> {
    /// The input didn't have the element's shape. Carries the input left at
    /// the point of failure, which is after whatever fixed-width text the
    /// element already consumed.
    Bad(&'v [u8]),
    /// The element parsed but the field is out of range.
    Range(&'static str),
}

type Step<'v> = Result<&'v [u8], Failure<'v>>;

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

/// Fields collected while walking the layout.
#[derive(Default)]
struct Fields {
    year: i64,
    month: Option<i64>,
    day: Option<i64>,
    yday: Option<i64>,
    hour: i64,
    minute: i64,
    second: i64,
    nanosecond: i64,
    meridiem: Option<Meridiem>,
    /// Seconds east of UTC. `None` when the layout has no zone.
    offset: Option<i64>,
}

const ZERO: &[u8] = b"00";

const DAYS_BEFORE: [i64; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in(month: i64, year: i64) -> i64 {
    if month == 2 && is_leap(year) {
        return 29;
    }
    DAYS_BEFORE[month as usize] - DAYS_BEFORE[month as usize - 1]
}

fn is_digit(s: &[u8], i: usize) -> bool {
    s.get(i).is_some_and(u8::is_ascii_digit)
}

fn digit(b: u8) -> i64 {
    i64::from(b - b'0')
}

/// Splits off the first `n` bytes, if there are that many.
fn split(s: &[u8], n: usize) -> Option<(&[u8], &[u8])> {
    (s.len() >= n).then(|| s.split_at(n))
}

fn is_comma_or_period(b: u8) -> bool {
    b == b'.' || b == b','
}

/// Parses one or two digits, exactly two when `fixed`.
fn getnum(s: &[u8], fixed: bool) -> Option<(i64, &[u8])> {
    if !is_digit(s, 0) {
        return None;
    }
    if !is_digit(s, 1) {
        if fixed {
            return None;
        }
        return Some((digit(s[0]), &s[1..]));
    }
    Some((digit(s[0]) * 10 + digit(s[1]), &s[2..]))
}

/// Parses one to three digits, exactly three when `fixed`.
fn getnum3(s: &[u8], fixed: bool) -> Option<(i64, &[u8])> {
    let n = s.iter().take(3).take_while(|b| b.is_ascii_digit()).count();
    if n == 0 || (fixed && n != 3) {
        return None;
    }
    let value = s[..n].iter().fold(0, |acc, &b| acc * 10 + digit(b));
    Some((value, &s[n..]))
}

/// Parses a whole slice as a decimal with an optional sign.
fn atoi(s: &[u8]) -> Option<i64> {
    let (negative, digits) = match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() {
        return None;
    }
    let mut n: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(digit(b))?;
    }
    Some(if negative { -n } else { n })
}

/// Case-insensitively matches one of `names` at the start of `value`.
fn lookup<'v>(names: &[&str], value: &'v [u8]) -> Option<(usize, &'v [u8])> {
    names.iter().enumerate().find_map(|(i, name)| {
        let name = name.as_bytes();
        let head = value.get(..name.len())?;
        head.eq_ignore_ascii_case(name).then(|| (i, &value[name.len()..]))
    })
}

fn trim_spaces(s: &[u8]) -> &[u8] {
    let n = s.iter().take_while(|&&b| b == b' ').count();
    &s[n..]
}

/// Consumes the literal `prefix` from `value`. A space in the prefix matches
/// any run of spaces. On mismatch returns the input left at that point.
fn skip<'v>(mut value: &'v [u8], prefix: &str) -> Result<&'v [u8], &'v [u8]> {
    let mut prefix = prefix.as_bytes();
    while let Some(&p) = prefix.first() {
        if p == b' ' {
            if value.first().is_some_and(|&b| b != b' ') {
                return Err(value);
            }
            prefix = trim_spaces(prefix);
            value = trim_spaces(value);
            continue;
        }
        match value.first() {
            Some(&v) if v == p => {
                prefix = &prefix[1..];
                value = &value[1..];
            }
            _ => return Err(value),
        }
    }
    Ok(value)
}

/// Parses `value[..len]` as a separator followed by fractional digits and
/// returns nanoseconds. Digits past the ninth are ignored.
fn parse_nanoseconds(value: &[u8], len: usize) -> Result<i64, Failure<'_>> {
    let bad = Failure::Bad(&value[len..]);
    if !is_comma_or_period(value[0]) {
        return Err(bad);
    }
    let len = len.min(10);
    let mut ns = atoi(&value[1..len]).ok_or(bad)?;
    if ns < 0 {
        return Err(Failure::Range("fractional second"));
    }
    for _ in len..10 {
        ns *= 10;
    }
    Ok(ns)
}

/// Length of a signed hour offset such as `+3`, or 0 if there isn't one.
fn signed_offset_len(value: &[u8]) -> usize {
    if !matches!(value.first(), Some(b'+' | b'-')) {
        return 0;
    }
    let digits = value[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    match atoi(&value[1..1 + digits]) {
        Some(hours) if digits > 0 && hours <= 12 => 1 + digits,
        _ => 0,
    }
}

/// Length of the zone abbreviation at the start of `value`, if it looks like
/// one: three to five capitals (four or five ending in `T`), `ChST`, `MeST`,
/// `WITA`, `GMT` with an optional signed hour, or a bare signed hour.
fn zone_name_len(value: &[u8]) -> Option<usize> {
    if value.len() < 3 {
        return None;
    }
    if value.starts_with(b"ChST") || value.starts_with(b"MeST") {
        return Some(4);
    }
    if value.starts_with(b"GMT") {
        return Some(3 + signed_offset_len(&value[3..]));
    }
    if matches!(value[0], b'+' | b'-') {
        return Some(signed_offset_len(value)).filter(|&n| n > 0);
    }
    let upper = value.iter().take(6).take_while(|b| b.is_ascii_uppercase()).count();
    match upper {
        5 if value[4] == b'T' => Some(5),
        4 if value[3] == b'T' || value.starts_with(b"WITA") => Some(4),
        3 => Some(3),
        _ => None,
    }
}

struct Parser<'l, 'v> {
    layout: &'l str,
    value: &'v [u8],
    fields: Fields,
}

impl<'l, 'v> Parser<'l, 'v> {
    fn mismatch(&self, layout_elem: &str, value_elem: &[u8]) -> ParseError {
        ParseError::mismatch(self.layout, self.value, layout_elem, value_elem)
    }

    fn invalid(&self, message: impl Into<String>) -> ParseError {
        ParseError::invalid(self.layout, self.value, message)
    }

    fn parse(mut self) -> Result<DateTime<FixedOffset>, ParseError> {
        let mut layout = self.layout;
        let mut value = self.value;
        loop {
            let chunk = next_chunk(layout);
            value = skip(value, chunk.prefix).map_err(|rest| self.mismatch(chunk.prefix, rest))?;
            let Some(element) = chunk.element else {
                if !value.is_empty() {
                    return Err(self.invalid(format!("extra text: {}", Quoted(value))));
                }
                break;
            };
            layout = chunk.suffix;
            value = match self.element(element, value, layout) {
                Ok(rest) => rest,
                Err(Failure::Bad(rest)) => return Err(self.mismatch(chunk.text, rest)),
                Err(Failure::Range(field)) => {
                    return Err(self.invalid(format!("{field} out of range")))
                }
            };
        }
        self.finish()
    }

    /// Consumes one element from `value`. `layout` is what follows the
    /// element.
    fn element(&mut self, element: Element, value: &'v [u8], layout: &str) -> Step<'v> {
        let f = &mut self.fields;
        let bad = || Failure::Bad(value);
        match element {
            Element::Year => {
                let (p, rest) = split(value, 2).ok_or_else(bad)?;
                let year = atoi(p).ok_or(Failure::Bad(rest))?;
                f.year = if year >= 69 { year + 1900 } else { year + 2000 };
                Ok(rest)
            }
            Element::LongYear => {
                if !is_digit(value, 0) {
                    return Err(bad());
                }
                let (p, rest) = split(value, 4).ok_or_else(bad)?;
                f.year = atoi(p).ok_or(Failure::Bad(rest))?;
                Ok(rest)
            }
            Element::Month | Element::LongMonth => {
                let short;
                let names: &[&str] = if element == Element::Month {
                    short = MONTH_NAMES.map(|name| &name[..3]);
                    &short
                } else {
                    &MONTH_NAMES
                };
                let (i, rest) = lookup(names, value).ok_or_else(bad)?;
                f.month = Some(i as i64 + 1);
                Ok(rest)
            }
            Element::NumMonth | Element::ZeroMonth => {
                let (month, rest) =
                    getnum(value, element == Element::ZeroMonth).ok_or_else(bad)?;
                if !(1..=12).contains(&month) {
                    return Err(Failure::Range("month"));
                }
                f.month = Some(month);
                Ok(rest)
            }
            // Weekdays are checked for shape and otherwise ignored.
            Element::Weekday => {
                let short = DAY_NAMES.map(|name| &name[..3]);
                Ok(lookup(&short, value).ok_or_else(bad)?.1)
            }
            Element::LongWeekday => Ok(lookup(&DAY_NAMES, value).ok_or_else(bad)?.1),
            Element::Day | Element::UnderDay | Element::ZeroDay => {
                let mut value = value;
                if element == Element::UnderDay && value.first() == Some(&b' ') {
                    value = &value[1..];
                }
                // Any one or two digit day; it's checked against the month at
                // the end.
                let (day, rest) =
                    getnum(value, element == Element::ZeroDay).ok_or(Failure::Bad(value))?;
                f.day = Some(day);
                Ok(rest)
            }
            Element::UnderYearDay | Element::ZeroYearDay => {
                let mut value = value;
                if element == Element::UnderYearDay {
                    for _ in 0..2 {
                        if value.first() == Some(&b' ') {
                            value = &value[1..];
                        }
                    }
                }
                let (yday, rest) = getnum3(value, element == Element::ZeroYearDay)
                    .ok_or(Failure::Bad(value))?;
                f.yday = Some(yday);
                Ok(rest)
            }
            Element::Hour => {
                let (hour, rest) = getnum(value, false).ok_or_else(bad)?;
                if hour >= 24 {
                    return Err(Failure::Range("hour"));
                }
                f.hour = hour;
                Ok(rest)
            }
            Element::Hour12 | Element::ZeroHour12 => {
                let (hour, rest) =
                    getnum(value, element == Element::ZeroHour12).ok_or_else(bad)?;
                if hour > 12 {
                    return Err(Failure::Range("hour"));
                }
                f.hour = hour;
                Ok(rest)
            }
            Element::Minute | Element::ZeroMinute => {
                let (minute, rest) =
                    getnum(value, element == Element::ZeroMinute).ok_or_else(bad)?;
                if minute >= 60 {
                    return Err(Failure::Range("minute"));
                }
                f.minute = minute;
                Ok(rest)
            }
            Element::Second | Element::ZeroSecond => {
                let (second, mut rest) =
                    getnum(value, element == Element::ZeroSecond).ok_or_else(bad)?;
                if second >= 60 {
                    return Err(Failure::Range("second"));
                }
                f.second = second;
                // A fraction in the input is accepted even when the layout
                // has no fraction element right after the seconds.
                if rest.len() >= 2
                    && is_comma_or_period(rest[0])
                    && is_digit(rest, 1)
                    && !next_chunk(layout).element.is_some_and(Element::is_fraction)
                {
                    let n = 2 + rest[2..].iter().take_while(|b| b.is_ascii_digit()).count();
                    f.nanosecond = parse_nanoseconds(rest, n)?;
                    rest = &rest[n..];
                }
                Ok(rest)
            }
            Element::UpperMeridiem | Element::LowerMeridiem => {
                let (p, rest) = split(value, 2).ok_or_else(bad)?;
                let (am, pm): (&[u8], &[u8]) = if element == Element::UpperMeridiem {
                    (b"AM", b"PM")
                } else {
                    (b"am", b"pm")
                };
                f.meridiem = Some(match p {
                    p if p == am => Meridiem::Am,
                    p if p == pm => Meridiem::Pm,
                    _ => return Err(Failure::Bad(rest)),
                });
                Ok(rest)
            }
            Element::Offset { z: true, .. } if value.first() == Some(&b'Z') => {
                f.offset = Some(0);
                Ok(&value[1..])
            }
            Element::Offset { style, .. } => {
                // (sign, hours, minutes, seconds, rest)
                let parts: (u8, &[u8], &[u8], &[u8], &[u8]) = match style {
                    OffsetStyle::HoursColonMinutes => {
                        if value.len() < 6 || value[3] != b':' {
                            return Err(bad());
                        }
                        (value[0], &value[1..3], &value[4..6], ZERO, &value[6..])
                    }
                    OffsetStyle::Hours => {
                        if value.len() < 3 {
                            return Err(bad());
                        }
                        (value[0], &value[1..3], ZERO, ZERO, &value[3..])
                    }
                    OffsetStyle::HoursColonMinutesColonSeconds => {
                        if value.len() < 9 || value[3] != b':' || value[6] != b':' {
                            return Err(bad());
                        }
                        (value[0], &value[1..3], &value[4..6], &value[7..9], &value[9..])
                    }
                    OffsetStyle::HoursMinutesSeconds => {
                        if value.len() < 7 {
                            return Err(bad());
                        }
                        (value[0], &value[1..3], &value[3..5], &value[5..7], &value[7..])
                    }
                    OffsetStyle::HoursMinutes => {
                        if value.len() < 5 {
                            return Err(bad());
                        }
                        (value[0], &value[1..3], &value[3..5], ZERO, &value[5..])
                    }
                };
                let (sign, hours, minutes, seconds, rest) = parts;
                let num = |s: &[u8]| getnum(s, true).map(|(n, _)| n).ok_or(Failure::Bad(rest));
                let (hours, minutes, seconds) = (num(hours)?, num(minutes)?, num(seconds)?);
                // Offsets of exactly 24 hours or 60 minutes or 60 seconds
                // show up in the wild, so only beyond that is out of range.
                if hours > 24 {
                    return Err(Failure::Range("time zone offset hour"));
                }
                if minutes > 60 {
                    return Err(Failure::Range("time zone offset minute"));
                }
                if seconds > 60 {
                    return Err(Failure::Range("time zone offset second"));
                }
                let offset = (hours * 60 + minutes) * 60 + seconds;
                f.offset = Some(match sign {
                    b'+' => offset,
                    b'-' => -offset,
                    _ => return Err(Failure::Bad(rest)),
                });
                Ok(rest)
            }
            Element::ZoneName => {
                if value.starts_with(b"UTC") {
                    f.offset = Some(0);
                    return Ok(&value[3..]);
                }
                let n = zone_name_len(value).ok_or_else(bad)?;
                let (name, rest) = value.split_at(n);
                // Only `GMT+h` says what its offset is. Other abbreviations
                // are ambiguous without a zone database and read as UTC.
                let hours = match name.strip_prefix(&b"GMT"[..]) {
                    Some(hours) if !hours.is_empty() => atoi(hours).unwrap_or(0),
                    _ => 0,
                };
                f.offset = Some(hours * 3600);
                Ok(rest)
            }
            Element::Fraction { digits, trim: false, .. } => {
                // A fixed fraction needs exactly as many digits as the layout.
                let n = 1 + digits;
                if value.len() < n {
                    return Err(bad());
                }
                f.nanosecond = parse_nanoseconds(value, n)?;
                Ok(&value[n..])
            }
            Element::Fraction { trim: true, .. } => {
                if value.len() < 2 || !is_comma_or_period(value[0]) || !is_digit(value, 1) {
                    // The fraction was omitted.
                    return Ok(value);
                }
                // Take every digit there is, even more than the layout asks
                // for, like the seconds element would.
                let n = 1 + value[1..].iter().take_while(|b| b.is_ascii_digit()).count();
                f.nanosecond = parse_nanoseconds(value, n)?;
                Ok(&value[n..])
            }
        }
    }

    /// Validates the collected fields and builds the instant.
    fn finish(self) -> Result<DateTime<FixedOffset>, ParseError> {
        let Fields {
            year,
            mut month,
            mut day,
            yday,
            mut hour,
            minute,
            second,
            nanosecond,
            meridiem,
            offset,
        } = self.fields;

        match meridiem {
            Some(Meridiem::Pm) if hour < 12 => hour += 12,
            Some(Meridiem::Am) if hour == 12 => hour = 0,
            _ => {}
        }

        if let Some(mut yday) = yday {
            let mut m = 0;
            let mut d = 0;
            if is_leap(year) {
                if yday == 31 + 29 {
                    m = 2;
                    d = 29;
                } else if yday > 31 + 29 {
                    yday -= 1;
                }
            }
            if !(1..=365).contains(&yday) {
                return Err(self.invalid("day-of-year out of range"));
            }
            if m == 0 {
                m = (yday - 1) / 31 + 1;
                if DAYS_BEFORE[m as usize] < yday {
                    m += 1;
                }
                d = yday - DAYS_BEFORE[m as usize - 1];
            }
            if month.is_some_and(|month| month != m) {
                return Err(self.invalid("day-of-year does not match month"));
            }
            if day.is_some_and(|day| day != d) {
                return Err(self.invalid("day-of-year does not match day"));
            }
            month = Some(m);
            day = Some(d);
        }
        let month = month.unwrap_or(1);
        let day = day.unwrap_or(1);
        if day < 1 || day > days_in(month, year) {
            return Err(self.invalid("day out of range"));
        }

        let offset = match offset {
            None => civil::utc(),
            Some(seconds) => FixedOffset::east_opt(seconds as i32)
                .ok_or_else(|| self.invalid("time zone offset out of range"))?,
        };
        Ok(civil::datetime(
            year, month, day, hour, minute, second, nanosecond, offset,
        ))
    }
}

/// Parses `value` against `layout`. See [`crate::layout`].
pub(crate) fn parse(layout: &str, value: &[u8]) -> Result<DateTime<FixedOffset>, ParseError> {
    Parser {
        layout,
        value,
        fields: Fields::default(),
    }
    .parse()
}

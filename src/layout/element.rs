/// How a UTC offset is written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OffsetStyle {
    /// `-07`
    Hours,
    /// `-0700`
    HoursMinutes,
    /// `-07:00`
    HoursColonMinutes,
    /// `-070000`
    HoursMinutesSeconds,
    /// `-07:00:00`
    HoursColonMinutesColonSeconds,
}

/// One placeholder in a layout, standing for a component of the reference
/// instant `Mon Jan 2 15:04:05 MST 2006`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Element {
    /// `January`
    LongMonth,
    /// `Jan`
    Month,
    /// `1`
    NumMonth,
    /// `01`
    ZeroMonth,
    /// `Monday`
    LongWeekday,
    /// `Mon`
    Weekday,
    /// `2`
    Day,
    /// `_2`
    UnderDay,
    /// `02`
    ZeroDay,
    /// `__2`
    UnderYearDay,
    /// `002`
    ZeroYearDay,
    /// `15`
    Hour,
    /// `3`
    Hour12,
    /// `03`
    ZeroHour12,
    /// `4`
    Minute,
    /// `04`
    ZeroMinute,
    /// `5`
    Second,
    /// `05`
    ZeroSecond,
    /// `2006`
    LongYear,
    /// `06`
    Year,
    /// `PM`
    UpperMeridiem,
    /// `pm`
    LowerMeridiem,
    /// `MST`
    ZoneName,
    /// `-0700` and friends, or with `z` set, `Z0700` and friends which print
    /// `Z` for UTC.
    Offset { style: OffsetStyle, z: bool },
    /// `.000` (fixed width) or `.999` (trailing zeros trimmed), also with a
    /// comma separator.
    Fraction { digits: usize, trim: bool, separator: u8 },
}

impl Element {
    pub(crate) fn is_fraction(self) -> bool {
        matches!(self, Self::Fraction { .. })
    }
}

/// A layout split around its first element.
#[derive(Debug)]
pub(crate) struct Chunk<'l> {
    /// Literal text before the element.
    pub(crate) prefix: &'l str,
    /// The element's own text, empty when there is no element.
    pub(crate) text: &'l str,
    pub(crate) element: Option<Element>,
    /// Everything after the element.
    pub(crate) suffix: &'l str,
}

const OFFSETS: [(&str, OffsetStyle); 5] = [
    ("070000", OffsetStyle::HoursMinutesSeconds),
    ("07:00:00", OffsetStyle::HoursColonMinutesColonSeconds),
    ("0700", OffsetStyle::HoursMinutes),
    ("07:00", OffsetStyle::HoursColonMinutes),
    ("07", OffsetStyle::Hours),
];

fn starts_with_lower(s: &[u8]) -> bool {
    s.first().is_some_and(u8::is_ascii_lowercase)
}

/// Finds the first element in `layout`.
///
/// Every element starts with an ASCII byte, so all the splits land on char
/// boundaries.
pub(crate) fn next_chunk(layout: &str) -> Chunk<'_> {
    let b = layout.as_bytes();
    let chunk = |start: usize, len: usize, element: Element| Chunk {
        prefix: &layout[..start],
        text: &layout[start..start + len],
        element: Some(element),
        suffix: &layout[start + len..],
    };
    let rest_is = |i: usize, s: &str| b[i..].starts_with(s.as_bytes());

    for i in 0..b.len() {
        match b[i] {
            b'J' if rest_is(i, "Jan") => {
                if rest_is(i, "January") {
                    return chunk(i, 7, Element::LongMonth);
                }
                if !starts_with_lower(&b[i + 3..]) {
                    return chunk(i, 3, Element::Month);
                }
            }
            b'M' => {
                if rest_is(i, "Mon") {
                    if rest_is(i, "Monday") {
                        return chunk(i, 6, Element::LongWeekday);
                    }
                    if !starts_with_lower(&b[i + 3..]) {
                        return chunk(i, 3, Element::Weekday);
                    }
                }
                if rest_is(i, "MST") {
                    return chunk(i, 3, Element::ZoneName);
                }
            }
            b'0' => {
                let zero = match b.get(i + 1) {
                    Some(b'1') => Some(Element::ZeroMonth),
                    Some(b'2') => Some(Element::ZeroDay),
                    Some(b'3') => Some(Element::ZeroHour12),
                    Some(b'4') => Some(Element::ZeroMinute),
                    Some(b'5') => Some(Element::ZeroSecond),
                    Some(b'6') => Some(Element::Year),
                    _ => None,
                };
                if let Some(element) = zero {
                    return chunk(i, 2, element);
                }
                if rest_is(i, "002") {
                    return chunk(i, 3, Element::ZeroYearDay);
                }
            }
            b'1' => {
                if rest_is(i, "15") {
                    return chunk(i, 2, Element::Hour);
                }
                return chunk(i, 1, Element::NumMonth);
            }
            b'2' => {
                if rest_is(i, "2006") {
                    return chunk(i, 4, Element::LongYear);
                }
                return chunk(i, 1, Element::Day);
            }
            b'_' => {
                if rest_is(i, "_2") {
                    // `_2006` is a literal underscore followed by a year.
                    if rest_is(i + 1, "2006") {
                        return chunk(i + 1, 4, Element::LongYear);
                    }
                    return chunk(i, 2, Element::UnderDay);
                }
                if rest_is(i, "__2") {
                    return chunk(i, 3, Element::UnderYearDay);
                }
            }
            b'3' => return chunk(i, 1, Element::Hour12),
            b'4' => return chunk(i, 1, Element::Minute),
            b'5' => return chunk(i, 1, Element::Second),
            b'P' if rest_is(i, "PM") => return chunk(i, 2, Element::UpperMeridiem),
            b'p' if rest_is(i, "pm") => return chunk(i, 2, Element::LowerMeridiem),
            c @ (b'-' | b'Z') => {
                for (tail, style) in OFFSETS {
                    if rest_is(i + 1, tail) {
                        let element = Element::Offset { style, z: c == b'Z' };
                        return chunk(i, 1 + tail.len(), element);
                    }
                }
            }
            separator @ (b'.' | b',') => {
                if let Some(&digit @ (b'0' | b'9')) = b.get(i + 1) {
                    let run = b[i + 1..].iter().take_while(|&&d| d == digit).count();
                    let end = i + 1 + run;
                    // The run of digits has to end the number, otherwise it's
                    // a literal.
                    if !b.get(end).is_some_and(u8::is_ascii_digit) {
                        let element = Element::Fraction {
                            digits: run,
                            trim: digit == b'9',
                            separator,
                        };
                        return chunk(i, 1 + run, element);
                    }
                }
            }
            _ => {}
        }
    }
    Chunk {
        prefix: layout,
        text: "",
        element: None,
        suffix: "",
    }
}

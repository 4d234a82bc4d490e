//! Formatting and parsing by example.
//!
//! A layout is the reference instant `Mon Jan 2 15:04:05 MST 2006` written
//! the way values should look. Each component of the reference instant is an
//! element that stands for the same component of the value:
//!
//! | Element | Meaning |
//! |---|---|
//! | `2006` `06` | year, two digit year |
//! | `January` `Jan` `01` `1` | month |
//! | `Monday` `Mon` | weekday |
//! | `02` `_2` `2` | day of month |
//! | `002` `__2` | day of year |
//! | `15` `03` `3` | hour, 24 or 12 hour clock |
//! | `04` `4` | minute |
//! | `05` `5` | second |
//! | `.000` `.999` `,000` `,999` | fractional second, fixed or trimmed |
//! | `PM` `pm` | meridiem |
//! | `-0700` `-07:00` `-07` `-070000` `-07:00:00` | offset from UTC |
//! | `Z0700` `Z07:00` `Z07` `Z070000` `Z07:00:00` | offset, `Z` for UTC |
//! | `MST` | zone abbreviation |
//!
//! Everything else is literal text. A space in the layout matches any run of
//! spaces in the input.
//!
//! ```
//! use datestamp::{civil, layout};
//!
//! let t = civil::datetime(2024, 3, 9, 17, 5, 0, 0, civil::utc());
//! assert_eq!(layout::format(&t, "Jan _2, 2006 at 3:04pm"), "Mar  9, 2024 at 5:05pm");
//!
//! let parsed = layout::parse("Jan _2, 2006 at 3:04pm", b"Mar  9, 2024 at 5:05pm").unwrap();
//! assert_eq!(parsed, t);
//! ```

mod element;
mod format;
mod parse;

use crate::error::ParseError;
use chrono::{DateTime, FixedOffset};

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Formats `t` according to `layout`, in `t`'s own offset.
pub fn format(t: &DateTime<FixedOffset>, layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() + 10);
    format_into(&mut out, t, layout);
    out
}

pub(crate) use format::format_into;

/// Parses `value` according to `layout`.
///
/// Missing components default to January 1 of year 0 at midnight UTC. When
/// the layout has no offset or zone the result is in UTC.
///
/// # Errors
///
/// Returns a [`ParseError`] when `value` doesn't have the layout's shape, a
/// component is out of range or text is left over.
pub fn parse(layout: &str, value: &[u8]) -> Result<DateTime<FixedOffset>, ParseError> {
    parse::parse(layout, value)
}

//! Conversions from the date types of other crates.
//!
//! Each converts through [`civil`](crate::civil), so every value either crate
//! can hold maps to some `Date` or `FormattedTime` without failing.

#[cfg(feature = "jiff")]
mod jiff;
#[cfg(feature = "time")]
mod time;

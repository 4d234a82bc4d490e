use super::TimeFormat;

macro_rules! impl_time_format {
    ($($(#[$attr:meta])* $name:ident => $layout:literal),+ $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
            pub struct $name;

            impl TimeFormat for $name {
                const LAYOUT: &'static str = $layout;
            }
        )+
    }
}

impl_time_format!(
    /// RFC 3339 without fractional seconds, e.g. `2006-01-02T15:04:05Z` or
    /// `2006-01-02T15:04:05-07:00`.
    Rfc3339 => "2006-01-02T15:04:05Z07:00",
    /// `YYYY-MM-DD HH:MM:SS`.
    YearMonthDayTime => "2006-01-02 15:04:05",
    /// `YYYY-MM-DD`.
    Iso8601Date => "2006-01-02",
    /// `MM/DD/YYYY`, as is common in North America.
    MonthDayYear => "01/02/2006",
    /// `DD/MM/YYYY`, as is common in Europe.
    DayMonthYear => "02/01/2006",
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{civil, layout, FormattedTime, Scan, SqlValue};
    use chrono::{DateTime, FixedOffset};

    fn instant() -> DateTime<FixedOffset> {
        civil::datetime(1996, 2, 14, 21, 5, 9, 250_000_000, civil::offset(-8 * 3600))
    }

    fn random_instants(n: usize) -> impl Iterator<Item = DateTime<FixedOffset>> {
        crate::random_data::<(u16, u32, u32, i16)>(n)
            .into_iter()
            .map(|(year, seconds, nanos, offset)| {
                civil::datetime(
                    i64::from(year % 9000),
                    1,
                    1,
                    0,
                    0,
                    i64::from(seconds % (366 * 86_400)),
                    i64::from(nanos % 1_000_000_000),
                    civil::offset(i64::from(offset % 1080) * 60),
                )
            })
    }

    macro_rules! test_time_format {
        ($($name:ident => $want:literal),+) => {
            paste::paste! {
                $(
                    #[test]
                    fn [<$name:snake _display>]() {
                        let t = FormattedTime::<$name>::from(instant());
                        assert_eq!(t.to_string(), $want);
                        assert_eq!(t.to_string(), layout::format(&instant(), $name::LAYOUT));
                        assert_eq!(t.layout(), $name::LAYOUT);
                    }

                    #[test]
                    fn [<$name:snake _text_is_stable>]() {
                        for t in random_instants(500) {
                            let t = FormattedTime::<$name>::from(t);
                            let text = t.marshal_text();
                            let mut parsed = FormattedTime::<$name>::default();
                            parsed.unmarshal_text(&text).unwrap();
                            assert_eq!(parsed.marshal_text(), text, "{t:?}");

                            // Parsing loses exactly what the layout doesn't show.
                            let mut again = FormattedTime::<$name>::default();
                            again.unmarshal_text(&parsed.marshal_text()).unwrap();
                            assert_eq!(again, parsed);
                        }
                    }

                    #[test]
                    fn [<$name:snake _scan>]() {
                        let mut t = FormattedTime::<$name>::default();
                        t.scan(&SqlValue::from($want)).unwrap();
                        assert_eq!(t.to_string(), $want);
                        assert_eq!(format!("{t:?}"), concat!("FormattedTime[", stringify!($name), "](", $want, ")"));

                        let err = t.scan(&SqlValue::from("x")).unwrap_err();
                        assert_eq!(
                            err.to_string(),
                            format!(
                                r#"scan failed: unable to unmarshal x into FormattedTime[{}]: parsing time "x" as "{}": cannot parse "x" as "{}""#,
                                stringify!($name),
                                $name::LAYOUT,
                                &$name::LAYOUT[..$name::LAYOUT.find(|c: char| c == '-' || c == '/').unwrap()],
                            )
                        );
                    }
                )+
            }
        }
    }

    test_time_format!(
        Rfc3339 => "1996-02-14T21:05:09-08:00",
        YearMonthDayTime => "1996-02-14 21:05:09",
        Iso8601Date => "1996-02-14",
        MonthDayYear => "02/14/1996",
        DayMonthYear => "14/02/1996"
    );

    #[test]
    fn descriptors_are_distinct_types() {
        let rfc = FormattedTime::<Rfc3339>::from(instant());
        let date = FormattedTime::<Iso8601Date>::from(rfc.time());
        assert_eq!(rfc.time(), date.time());
        assert_ne!(rfc.to_string(), date.to_string());
    }
}

#![no_main]
use datestamp::{
    layout, Date, DayMonthYear, FormattedTime, Iso8601Date, MonthDayYear, Rfc3339, Scan,
    SqlValue, TimeFormat, YearMonthDayTime, SCAN_FAILED,
};
use libfuzzer_sys::fuzz_target;

#[inline(never)]
fn test_date(data: &[u8]) {
    let mut d = Date::default();
    let mut scanned = Date::default();
    let scan = scanned.scan(&SqlValue::Bytes(data.to_vec()));
    if d.unmarshal_text(data).is_ok() {
        // Whatever parses formats back to text that parses to the same date.
        let text = d.marshal_text();
        let mut d2 = Date::default();
        d2.unmarshal_text(&text).unwrap();
        assert_eq!(d, d2);
        assert_eq!(scan, Ok(()));
        assert_eq!(scanned, d);

        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), d);
    } else {
        assert!(scan.unwrap_err().to_string().starts_with(SCAN_FAILED));
        assert_eq!(scanned, Date::default());
    }
}

#[inline(never)]
fn test_format<F: TimeFormat>(data: &[u8]) {
    let mut t = FormattedTime::<F>::default();
    if t.unmarshal_text(data).is_ok() {
        // Parsing may drop what the layout doesn't show, but only once.
        let text = t.marshal_text();
        let mut t2 = FormattedTime::<F>::default();
        t2.unmarshal_text(&text).unwrap();
        assert_eq!(t2.marshal_text(), text);

        let mut scanned = FormattedTime::<F>::default();
        scanned.scan(&SqlValue::Bytes(data.to_vec())).unwrap();
        assert_eq!(scanned, t);
    }
}

#[inline(never)]
fn test_layout(data: &[u8]) {
    // Layout and value separated by the first zero byte.
    let Some(split) = data.iter().position(|&b| b == 0) else {
        return;
    };
    let Ok(l) = std::str::from_utf8(&data[..split]) else {
        return;
    };
    let Ok(t) = layout::parse(l, &data[split + 1..]) else {
        return;
    };
    // Not every layout reparses its own output, but one that does is stable.
    let text = layout::format(&t, l);
    if let Ok(t2) = layout::parse(l, text.as_bytes()) {
        assert_eq!(layout::format(&t2, l), text);
    }
}

fuzz_target!(|data: &[u8]| {
    let [which, data @ ..] = data else {
        return;
    };
    match which % 7 {
        0 => test_date(data),
        1 => test_format::<Rfc3339>(data),
        2 => test_format::<YearMonthDayTime>(data),
        3 => test_format::<Iso8601Date>(data),
        4 => test_format::<MonthDayYear>(data),
        5 => test_format::<DayMonthYear>(data),
        _ => test_layout(data),
    }
});

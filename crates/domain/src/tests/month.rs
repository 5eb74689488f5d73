// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;
use time::Month;
use time::macros::date;

use crate::{DomainError, MonthKey, format_iso_date, parse_iso_date};

#[test]
fn test_month_key_parses_and_displays() {
    let key: MonthKey = MonthKey::from_str("2025-03").unwrap();
    assert_eq!(key.year(), 2025);
    assert_eq!(key.month(), Month::March);
    assert_eq!(key.to_string(), "2025-03");
}

#[test]
fn test_month_key_rejects_malformed_input() {
    for input in ["2025", "2025-3", "2025-00", "2025-13", "25-03", "abcd-ef"] {
        let result: Result<MonthKey, DomainError> = MonthKey::from_str(input);
        assert!(matches!(result, Err(DomainError::InvalidMonthKey(_))), "accepted {input}");
    }
}

#[test]
fn test_month_key_contains_only_own_dates() {
    let march: MonthKey = MonthKey::new(2025, Month::March);
    assert!(march.contains(date!(2025 - 03 - 01)));
    assert!(march.contains(date!(2025 - 03 - 31)));
    assert!(!march.contains(date!(2025 - 02 - 28)));
    assert!(!march.contains(date!(2025 - 04 - 01)));
    assert!(!march.contains(date!(2024 - 03 - 15)));
}

#[test]
fn test_month_key_day_range() {
    let february: MonthKey = MonthKey::new(2024, Month::February);
    assert_eq!(february.day_count(), 29);
    assert_eq!(february.first_day().unwrap(), date!(2024 - 02 - 01));
    assert_eq!(february.last_day().unwrap(), date!(2024 - 02 - 29));

    let days: Vec<time::Date> = february.days().unwrap();
    assert_eq!(days.len(), 29);
    assert_eq!(days[0], date!(2024 - 02 - 01));
    assert_eq!(days[28], date!(2024 - 02 - 29));
}

#[test]
fn test_month_key_navigation_wraps_year() {
    let december: MonthKey = MonthKey::new(2025, Month::December);
    assert_eq!(december.next().unwrap(), MonthKey::new(2026, Month::January));

    let january: MonthKey = MonthKey::new(2026, Month::January);
    assert_eq!(
        january.previous().unwrap(),
        MonthKey::new(2025, Month::December)
    );
}

#[test]
fn test_month_key_navigation_rejects_out_of_range() {
    let last: MonthKey = MonthKey::new(9999, Month::December);
    assert!(matches!(
        last.next(),
        Err(DomainError::MonthOutOfRange { year: 10000 })
    ));
}

#[test]
fn test_parse_iso_date_valid() {
    let parsed: time::Date = parse_iso_date("2025-03-05").unwrap();
    assert_eq!(parsed, date!(2025 - 03 - 05));
}

#[test]
fn test_parse_iso_date_rejects_malformed() {
    for input in ["2025-3-5", "2025/03/05", "2025-02-30", "not-a-date", ""] {
        assert!(
            matches!(parse_iso_date(input), Err(DomainError::InvalidDate { .. })),
            "accepted {input}"
        );
    }
}

#[test]
fn test_format_iso_date_zero_pads() {
    assert_eq!(format_iso_date(date!(2025 - 03 - 05)), "2025-03-05");
    assert_eq!(format_iso_date(date!(0801 - 12 - 31)), "0801-12-31");
}

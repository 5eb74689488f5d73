// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;
use time::{Date, Month};

use crate::error::DomainError;

/// A calendar month, used to partition cached and persisted grid data.
///
/// Renders and parses as `YYYY-MM`, the form used in storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    /// Creates a month key.
    #[must_use]
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Returns the month containing the given date.
    #[must_use]
    pub const fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month of year.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns true when the date falls inside this month.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the number of days in this month.
    #[must_use]
    pub const fn day_count(&self) -> u8 {
        self.month.length(self.year)
    }

    /// Returns the first day of this month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside the supported calendar range.
    pub fn first_day(&self) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|_| DomainError::MonthOutOfRange { year: self.year })
    }

    /// Returns the last day of this month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside the supported calendar range.
    pub fn last_day(&self) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.year, self.month, self.day_count())
            .map_err(|_| DomainError::MonthOutOfRange { year: self.year })
    }

    /// Returns every date of this month in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside the supported calendar range.
    pub fn days(&self) -> Result<Vec<Date>, DomainError> {
        let mut days: Vec<Date> = Vec::with_capacity(usize::from(self.day_count()));
        for day in 1..=self.day_count() {
            let date: Date = Date::from_calendar_date(self.year, self.month, day)
                .map_err(|_| DomainError::MonthOutOfRange { year: self.year })?;
            days.push(date);
        }
        Ok(days)
    }

    /// Returns the following month.
    ///
    /// # Errors
    ///
    /// Returns an error if stepping forward leaves the supported year range.
    pub fn next(&self) -> Result<Self, DomainError> {
        let (year, month) = match self.month {
            Month::December => (self.year + 1, Month::January),
            other => (self.year, other.next()),
        };
        if !(1..=9999).contains(&year) {
            return Err(DomainError::MonthOutOfRange { year });
        }
        Ok(Self { year, month })
    }

    /// Returns the preceding month.
    ///
    /// # Errors
    ///
    /// Returns an error if stepping back leaves the supported year range.
    pub fn previous(&self) -> Result<Self, DomainError> {
        let (year, month) = match self.month {
            Month::January => (self.year - 1, Month::December),
            other => (self.year, other.previous()),
        };
        if !(1..=9999).contains(&year) {
            return Err(DomainError::MonthOutOfRange { year });
        }
        Ok(Self { year, month })
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonthKey(s.to_string());

        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month_number: u8 = month_part.parse().map_err(|_| invalid())?;
        let month: Month = Month::try_from(month_number).map_err(|_| invalid())?;

        if !(1..=9999).contains(&year) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

/// Parses a timezone-naive `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date in that form.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let invalid = |reason: String| DomainError::InvalidDate {
        value: value.to_string(),
        reason,
    };

    let mut parts = value.splitn(3, '-');
    let (Some(year_part), Some(month_part), Some(day_part)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid(String::from("expected YYYY-MM-DD")));
    };
    if year_part.len() != 4 || month_part.len() != 2 || day_part.len() != 2 {
        return Err(invalid(String::from("expected YYYY-MM-DD")));
    }

    let year: i32 = year_part
        .parse()
        .map_err(|_| invalid(String::from("year is not a number")))?;
    let month_number: u8 = month_part
        .parse()
        .map_err(|_| invalid(String::from("month is not a number")))?;
    let day: u8 = day_part
        .parse()
        .map_err(|_| invalid(String::from("day is not a number")))?;

    let month: Month =
        Month::try_from(month_number).map_err(|_| invalid(String::from("month out of range")))?;
    Date::from_calendar_date(year, month, day).map_err(|e| invalid(e.to_string()))
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee family name is empty.
    EmptyFamilyName,
    /// A name exceeds the display-width limit.
    NameTooLong {
        /// Which field was too long ("family name" or "given name").
        field: &'static str,
        /// The offending value.
        value: String,
        /// The maximum allowed character count.
        max: usize,
    },
    /// No employee exists with the given id.
    EmployeeNotFound(i64),
    /// A shift type with this code already exists.
    DuplicateShiftCode(String),
    /// No shift type exists with the given code.
    ShiftTypeNotFound(String),
    /// Shift type code is empty.
    EmptyShiftCode,
    /// A month key was not in `YYYY-MM` form.
    InvalidMonthKey(String),
    /// A date string was not a valid `YYYY-MM-DD` date.
    InvalidDate {
        /// The invalid date string.
        value: String,
        /// The parsing error message.
        reason: String,
    },
    /// Date arithmetic left the supported calendar range.
    MonthOutOfRange {
        /// The year that fell out of range.
        year: i32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFamilyName => write!(f, "Family name cannot be empty"),
            Self::NameTooLong { field, value, max } => {
                write!(
                    f,
                    "{field} '{value}' is too long: must be at most {max} characters"
                )
            }
            Self::EmployeeNotFound(id) => write!(f, "Employee {id} not found"),
            Self::DuplicateShiftCode(code) => {
                write!(f, "Shift type with code '{code}' already exists")
            }
            Self::ShiftTypeNotFound(code) => write!(f, "Shift type '{code}' not found"),
            Self::EmptyShiftCode => write!(f, "Shift type code cannot be empty"),
            Self::InvalidMonthKey(value) => {
                write!(f, "Invalid month key '{value}': expected YYYY-MM")
            }
            Self::InvalidDate { value, reason } => {
                write!(f, "Invalid date '{value}': {reason}")
            }
            Self::MonthOutOfRange { year } => {
                write!(f, "Month arithmetic left the supported range at year {year}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

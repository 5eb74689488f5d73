// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod catalog;
mod error;
mod month;
mod roster;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::ShiftCatalog;
pub use error::DomainError;
pub use month::{MonthKey, format_iso_date, parse_iso_date};
pub use roster::Roster;
pub use types::{
    CellKey, Employee, EmployeeId, ShiftAssignment, ShiftCode, ShiftType, ShiftValue, UNSET_GLYPH,
};
pub use validation::{NAME_MAX_CHARS, validate_employee_name};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// The glyph used for an explicitly-unset cell (U+2212 minus sign).
///
/// This is both the rendering placeholder and the storage sentinel: an
/// assignment whose value is the sentinel exists as a record, unlike a cell
/// that was never written at all.
pub const UNSET_GLYPH: &str = "−";

/// Stable identifier of an employee.
///
/// Ids are assigned monotonically (highest existing id plus one) and are
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId {
    value: i64,
}

impl EmployeeId {
    /// Creates an employee id from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self { value }
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An employee appearing as one row of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Stable identifier.
    pub id: EmployeeId,
    /// Family name; required, at most [`NAME_MAX_CHARS`](crate::NAME_MAX_CHARS) characters.
    pub family_name: String,
    /// Optional given name, used to disambiguate shared family names.
    pub given_name: Option<String>,
}

impl Employee {
    /// Creates an employee. Field validation happens at the boundary via
    /// [`validate_employee_name`](crate::validate_employee_name).
    #[must_use]
    pub const fn new(id: EmployeeId, family_name: String, given_name: Option<String>) -> Self {
        Self {
            id,
            family_name,
            given_name,
        }
    }

    /// Returns the display name: the family name, followed by the given
    /// name when one is present.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.given_name.as_ref().map_or_else(
            || self.family_name.clone(),
            |given| format!("{} {given}", self.family_name),
        )
    }
}

/// Short symbol denoting a shift type, as shown in a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftCode {
    value: String,
}

impl ShiftCode {
    /// Creates a shift code, trimming surrounding whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the code text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The value of a grid cell: a shift code, or explicitly unset.
///
/// `Unset` round-trips through storage as [`UNSET_GLYPH`] and is distinct
/// from "no record": clearing a cell stores the sentinel rather than
/// deleting history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShiftValue {
    /// No shift assigned; rendered as the placeholder glyph.
    Unset,
    /// An assigned shift code.
    Code(ShiftCode),
}

impl ShiftValue {
    /// Creates a value from a code string.
    #[must_use]
    pub fn code(value: &str) -> Self {
        Self::Code(ShiftCode::new(value))
    }

    /// Parses a stored cell string. Empty strings and the unset glyph map
    /// to `Unset`; anything else is a code.
    #[must_use]
    pub fn from_storage(raw: &str) -> Self {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() || trimmed == UNSET_GLYPH {
            Self::Unset
        } else {
            Self::Code(ShiftCode::new(trimmed))
        }
    }

    /// Returns the string stored for this value.
    #[must_use]
    pub fn as_storage(&self) -> &str {
        match self {
            Self::Unset => UNSET_GLYPH,
            Self::Code(code) => code.value(),
        }
    }

    /// Returns true when no shift is assigned.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl std::fmt::Display for ShiftValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_storage())
    }
}

impl Serialize for ShiftValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_storage())
    }
}

impl<'de> Deserialize<'de> for ShiftValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: String = String::deserialize(deserializer)?;
        Ok(Self::from_storage(&raw))
    }
}

/// Definition of one shift type shown in the picker and legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftType {
    /// Display symbol; unique within the active set.
    pub code: ShiftCode,
    /// Human-readable name.
    pub label: String,
    /// Rendering color as a hex string, e.g. `#3B82F6`.
    pub color: String,
    /// Optional free-text working hours, e.g. `9:00-17:30`.
    pub hours: Option<String>,
}

impl ShiftType {
    /// Creates a shift type definition.
    #[must_use]
    pub fn new(code: &str, label: &str, color: &str, hours: Option<&str>) -> Self {
        Self {
            code: ShiftCode::new(code),
            label: label.to_string(),
            color: color.to_string(),
            hours: hours.map(ToString::to_string),
        }
    }
}

/// A single (employee, date) coordinate in the grid.
///
/// The composite key is unique: at most one value exists per cell at any
/// time. Ordering is by employee, then date, which groups a month scan by
/// row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// The employee (row) coordinate.
    pub employee: EmployeeId,
    /// The calendar date (column) coordinate; timezone-naive.
    pub date: Date,
}

impl CellKey {
    /// Creates a cell key.
    #[must_use]
    pub const fn new(employee: EmployeeId, date: Date) -> Self {
        Self { employee, date }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.employee, self.date)
    }
}

/// The atomic unit of persisted state: one cell's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAssignment {
    /// The employee the shift belongs to.
    pub employee_id: EmployeeId,
    /// The calendar date of the shift.
    pub date: Date,
    /// The assigned value.
    pub value: ShiftValue,
}

impl ShiftAssignment {
    /// Creates an assignment.
    #[must_use]
    pub const fn new(employee_id: EmployeeId, date: Date, value: ShiftValue) -> Self {
        Self {
            employee_id,
            date,
            value,
        }
    }

    /// Returns the cell this assignment occupies.
    #[must_use]
    pub const fn cell(&self) -> CellKey {
        CellKey::new(self.employee_id, self.date)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use shift_grid_domain::{CellKey, Employee, EmployeeId, MonthKey, ShiftType, ShiftValue};
use time::Date;

/// An owned, read-only projection of one month of the grid.
///
/// Built on demand by the controller for export collaborators (CSV, email)
/// and the HTTP read path. Cell values are already resolved through the
/// catalog's rename map; holders cannot reach back into core state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    month: MonthKey,
    days: Vec<Date>,
    employees: Vec<Employee>,
    shift_types: Vec<ShiftType>,
    cells: BTreeMap<CellKey, ShiftValue>,
}

impl GridSnapshot {
    /// Assembles a snapshot from already-resolved parts.
    #[must_use]
    pub const fn new(
        month: MonthKey,
        days: Vec<Date>,
        employees: Vec<Employee>,
        shift_types: Vec<ShiftType>,
        cells: BTreeMap<CellKey, ShiftValue>,
    ) -> Self {
        Self {
            month,
            days,
            employees,
            shift_types,
            cells,
        }
    }

    /// Returns the snapshotted month.
    #[must_use]
    pub const fn month(&self) -> MonthKey {
        self.month
    }

    /// Returns every date of the month in order.
    #[must_use]
    pub fn days(&self) -> &[Date] {
        &self.days
    }

    /// Returns the employees in display order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the active shift-type definitions.
    #[must_use]
    pub fn shift_types(&self) -> &[ShiftType] {
        &self.shift_types
    }

    /// Returns the resolved value of one cell; unset when no shift is
    /// assigned there.
    #[must_use]
    pub fn shift_at(&self, employee: EmployeeId, date: Date) -> ShiftValue {
        self.cells
            .get(&CellKey::new(employee, date))
            .cloned()
            .unwrap_or(ShiftValue::Unset)
    }

    /// Returns the assigned (non-unset) cells.
    #[must_use]
    pub const fn cells(&self) -> &BTreeMap<CellKey, ShiftValue> {
        &self.cells
    }
}

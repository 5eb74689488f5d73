// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use shift_grid_domain::{CellKey, MonthKey, ShiftAssignment, ShiftCatalog, ShiftValue};

/// The in-memory grid: the single source of truth for reads.
///
/// Cells are keyed by (employee, date). Values are stored as written;
/// shift-type renames are resolved at read time through the catalog, so a
/// rename never rewrites stored records. Every user-originated mutation
/// must be paired with a queue update by the controller; populates from a
/// persistence-confirmed source must not be.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftStore {
    cells: BTreeMap<CellKey, ShiftValue>,
}

impl ShiftStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Reads a cell, resolving the stored code through the catalog's rename
    /// map. A cell with no record reads as unset.
    #[must_use]
    pub fn get(&self, cell: CellKey, catalog: &ShiftCatalog) -> ShiftValue {
        self.cells
            .get(&cell)
            .map_or(ShiftValue::Unset, |value| catalog.resolve(value))
    }

    /// Returns the raw stored record of a cell, unresolved.
    #[must_use]
    pub fn record(&self, cell: CellKey) -> Option<&ShiftValue> {
        self.cells.get(&cell)
    }

    /// Writes a cell. Returns `false` without storing when the new value
    /// equals the cell's current resolved value, so redundant edits produce
    /// no downstream work.
    pub fn set(&mut self, cell: CellKey, value: ShiftValue, catalog: &ShiftCatalog) -> bool {
        if self.get(cell, catalog) == catalog.resolve(&value) {
            return false;
        }
        self.cells.insert(cell, value);
        true
    }

    /// Writes a cell unconditionally, bypassing the no-op comparison. Used
    /// to re-apply pending optimistic edits on top of a fresh populate.
    pub fn overlay(&mut self, cell: CellKey, value: ShiftValue) {
        self.cells.insert(cell, value);
    }

    /// Replaces the given month's records from a persistence-confirmed
    /// source. Assignments dated outside the month are ignored; records of
    /// other months are left alone.
    pub fn populate_month(&mut self, month: MonthKey, assignments: Vec<ShiftAssignment>) {
        self.cells.retain(|cell, _| !month.contains(cell.date));
        for assignment in assignments {
            if month.contains(assignment.date) {
                self.cells.insert(assignment.cell(), assignment.value);
            }
        }
    }

    /// Removes every record dated in the given month, returning how many
    /// were removed. Other months are untouched.
    pub fn clear_month(&mut self, month: MonthKey) -> usize {
        let before: usize = self.cells.len();
        self.cells.retain(|cell, _| !month.contains(cell.date));
        before - self.cells.len()
    }

    /// Returns the raw records dated in the given month.
    #[must_use]
    pub fn assignments_in(&self, month: MonthKey) -> Vec<ShiftAssignment> {
        self.cells
            .iter()
            .filter(|(cell, _)| month.contains(cell.date))
            .map(|(cell, value)| ShiftAssignment::new(cell.employee, cell.date, value.clone()))
            .collect()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

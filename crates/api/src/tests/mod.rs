// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the export crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod csv_tests;

use std::collections::BTreeMap;

use shift_grid::GridSnapshot;
use shift_grid_domain::{CellKey, Employee, EmployeeId, MonthKey, ShiftType, ShiftValue};
use time::{Date, Month};

/// A two-employee March 2025 snapshot with the given cells filled in.
pub fn snapshot_with(cells: &[(i64, Date, &str)]) -> GridSnapshot {
    let month = MonthKey::new(2025, Month::March);
    let employees = vec![
        Employee::new(EmployeeId::new(1), String::from("佐藤"), None),
        Employee::new(
            EmployeeId::new(2),
            String::from("鈴木"),
            Some(String::from("花子")),
        ),
    ];
    let shift_types = vec![
        ShiftType::new("早", "早番", "#F59E0B", Some("07:00-16:00")),
        ShiftType::new("遅", "遅番", "#8B5CF6", None),
    ];
    let mut grid: BTreeMap<CellKey, ShiftValue> = BTreeMap::new();
    for (id, date, code) in cells {
        grid.insert(
            CellKey::new(EmployeeId::new(*id), *date),
            ShiftValue::code(code),
        );
    }
    GridSnapshot::new(
        month,
        month.days().expect("March 2025 is a valid month"),
        employees,
        shift_types,
        grid,
    )
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod sqlite_tests;

use shift_grid_domain::{
    Employee, EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftCode, ShiftType,
    ShiftValue,
};
use time::{Date, Month};

pub fn february() -> MonthKey {
    MonthKey::new(2025, Month::February)
}

pub fn march() -> MonthKey {
    MonthKey::new(2025, Month::March)
}

pub fn create_test_roster() -> Roster {
    Roster::from_employees(vec![
        Employee::new(EmployeeId::new(1), String::from("佐藤"), None),
        Employee::new(
            EmployeeId::new(2),
            String::from("鈴木"),
            Some(String::from("花子")),
        ),
    ])
}

/// A two-type catalog where 早 has been renamed to 朝, so rename
/// persistence is exercised by every catalog round trip.
pub fn create_test_catalog() -> ShiftCatalog {
    let mut catalog = ShiftCatalog::new();
    catalog
        .add(ShiftType::new("早", "早番", "#F59E0B", Some("07:00-16:00")))
        .expect("code is unique");
    catalog
        .add(ShiftType::new("遅", "遅番", "#8B5CF6", None))
        .expect("code is unique");
    catalog
        .update(
            &ShiftCode::new("早"),
            ShiftType::new("朝", "朝番", "#F59E0B", Some("07:00-16:00")),
        )
        .expect("code exists");
    catalog
}

pub fn value_of(
    cells: &[ShiftAssignment],
    employee: EmployeeId,
    date: Date,
) -> Option<ShiftValue> {
    cells
        .iter()
        .find(|cell| cell.employee_id == employee && cell.date == date)
        .map(|cell| cell.value.clone())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Employee, EmployeeId, Roster};

#[test]
fn test_default_roster_has_eight_rows_with_sequential_ids() {
    let roster: Roster = Roster::with_defaults();
    assert_eq!(roster.len(), 8);
    for (employee, expected) in roster.employees().iter().zip(1_i64..) {
        assert_eq!(employee.id, EmployeeId::new(expected));
    }
    assert_eq!(roster.employees()[0].family_name, "橋本");
    assert_eq!(roster.employees()[3].display_name(), "小林 広睴");
}

#[test]
fn test_add_assigns_highest_id_plus_one() {
    let mut roster: Roster = Roster::from_employees(vec![
        Employee::new(EmployeeId::new(1), String::from("橋本"), None),
        Employee::new(EmployeeId::new(7), String::from("梶"), None),
    ]);

    let id: EmployeeId = roster.add(String::from("寺田"), None).unwrap();
    assert_eq!(id, EmployeeId::new(8));
    assert!(roster.contains(id));
}

#[test]
fn test_add_to_empty_roster_starts_at_one() {
    let mut roster: Roster = Roster::new();
    let id: EmployeeId = roster.add(String::from("山崎"), None).unwrap();
    assert_eq!(id, EmployeeId::new(1));
}

#[test]
fn test_ids_are_not_reused_after_gaps() {
    let mut roster: Roster = Roster::from_employees(vec![Employee::new(
        EmployeeId::new(5),
        String::from("薄田"),
        None,
    )]);

    let id: EmployeeId = roster.add(String::from("棟方"), None).unwrap();
    assert_eq!(id, EmployeeId::new(6));
}

#[test]
fn test_add_rejects_invalid_name() {
    let mut roster: Roster = Roster::new();
    let result: Result<EmployeeId, DomainError> = roster.add(String::from("   "), None);
    assert!(matches!(result, Err(DomainError::EmptyFamilyName)));
    assert!(roster.is_empty());
}

#[test]
fn test_update_edits_in_place() {
    let mut roster: Roster = Roster::with_defaults();
    roster
        .update(EmployeeId::new(4), String::from("小林"), Some(String::from("改")))
        .unwrap();

    let employee: &Employee = roster.find(EmployeeId::new(4)).unwrap();
    assert_eq!(employee.display_name(), "小林 改");
    assert_eq!(roster.len(), 8);
}

#[test]
fn test_update_unknown_id_fails() {
    let mut roster: Roster = Roster::with_defaults();
    let result: Result<(), DomainError> = roster.update(EmployeeId::new(99), String::from("梶"), None);
    assert!(matches!(result, Err(DomainError::EmployeeNotFound(99))));
}

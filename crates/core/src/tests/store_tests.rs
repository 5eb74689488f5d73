// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_grid_domain::{
    CellKey, EmployeeId, MonthKey, ShiftAssignment, ShiftCatalog, ShiftCode, ShiftType, ShiftValue,
};
use time::Month;
use time::macros::date;

use crate::ShiftStore;

fn cell(employee: i64, date: time::Date) -> CellKey {
    CellKey::new(EmployeeId::new(employee), date)
}

fn catalog_with(code: &str) -> ShiftCatalog {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    catalog
        .add(ShiftType::new(code, "テスト", "#000000", None))
        .unwrap();
    catalog
}

#[test]
fn test_unwritten_cell_reads_unset() {
    let store: ShiftStore = ShiftStore::new();
    let catalog: ShiftCatalog = ShiftCatalog::new();
    assert!(store.get(cell(1, date!(2025 - 03 - 05)), &catalog).is_unset());
    assert!(store.record(cell(1, date!(2025 - 03 - 05))).is_none());
}

#[test]
fn test_set_then_get_roundtrip() {
    let mut store: ShiftStore = ShiftStore::new();
    let catalog: ShiftCatalog = catalog_with("成");
    let key: CellKey = cell(1, date!(2025 - 03 - 05));

    assert!(store.set(key, ShiftValue::code("成"), &catalog));
    assert_eq!(store.get(key, &catalog), ShiftValue::code("成"));
}

#[test]
fn test_redundant_set_is_noop() {
    let mut store: ShiftStore = ShiftStore::new();
    let catalog: ShiftCatalog = catalog_with("成");
    let key: CellKey = cell(1, date!(2025 - 03 - 05));

    assert!(store.set(key, ShiftValue::code("成"), &catalog));
    assert!(!store.set(key, ShiftValue::code("成"), &catalog));
}

#[test]
fn test_set_unset_on_empty_cell_is_noop() {
    let mut store: ShiftStore = ShiftStore::new();
    let catalog: ShiftCatalog = ShiftCatalog::new();
    assert!(!store.set(cell(1, date!(2025 - 03 - 05)), ShiftValue::Unset, &catalog));
    assert!(store.is_empty());
}

#[test]
fn test_set_compares_resolved_values() {
    let mut catalog: ShiftCatalog = catalog_with("A");
    let mut store: ShiftStore = ShiftStore::new();
    let key: CellKey = cell(1, date!(2025 - 03 - 05));
    store.set(key, ShiftValue::code("A"), &catalog);

    catalog
        .update(
            &ShiftCode::new("A"),
            ShiftType::new("B", "テスト", "#000000", None),
        )
        .unwrap();

    // The stored "A" now resolves to "B", so writing "B" changes nothing.
    assert!(!store.set(key, ShiftValue::code("B"), &catalog));
    assert!(store.set(key, ShiftValue::Unset, &catalog));
}

#[test]
fn test_get_resolves_rename_without_rewriting_record() {
    let mut catalog: ShiftCatalog = catalog_with("A");
    let mut store: ShiftStore = ShiftStore::new();
    let key: CellKey = cell(1, date!(2025 - 03 - 05));
    store.set(key, ShiftValue::code("A"), &catalog);

    catalog
        .update(
            &ShiftCode::new("A"),
            ShiftType::new("B", "テスト", "#000000", None),
        )
        .unwrap();

    assert_eq!(store.get(key, &catalog), ShiftValue::code("B"));
    assert_eq!(store.record(key), Some(&ShiftValue::code("A")));
}

#[test]
fn test_populate_replaces_only_target_month() {
    let mut store: ShiftStore = ShiftStore::new();
    let catalog: ShiftCatalog = catalog_with("成");
    let march: MonthKey = MonthKey::new(2025, Month::March);
    store.set(cell(1, date!(2025 - 02 - 10)), ShiftValue::code("成"), &catalog);
    store.set(cell(1, date!(2025 - 03 - 05)), ShiftValue::code("成"), &catalog);

    store.populate_month(
        march,
        vec![ShiftAssignment::new(
            EmployeeId::new(2),
            date!(2025 - 03 - 20),
            ShiftValue::code("成"),
        )],
    );

    assert!(store.get(cell(1, date!(2025 - 03 - 05)), &catalog).is_unset());
    assert_eq!(
        store.get(cell(2, date!(2025 - 03 - 20)), &catalog),
        ShiftValue::code("成")
    );
    assert_eq!(
        store.get(cell(1, date!(2025 - 02 - 10)), &catalog),
        ShiftValue::code("成")
    );
}

#[test]
fn test_populate_ignores_records_outside_month() {
    let mut store: ShiftStore = ShiftStore::new();
    let march: MonthKey = MonthKey::new(2025, Month::March);

    store.populate_month(
        march,
        vec![ShiftAssignment::new(
            EmployeeId::new(1),
            date!(2025 - 04 - 01),
            ShiftValue::code("成"),
        )],
    );

    assert!(store.is_empty());
}

#[test]
fn test_clear_month_removes_exactly_one_month() {
    let mut store: ShiftStore = ShiftStore::new();
    let catalog: ShiftCatalog = catalog_with("成");
    store.set(cell(1, date!(2025 - 02 - 10)), ShiftValue::code("成"), &catalog);
    store.set(cell(1, date!(2025 - 03 - 05)), ShiftValue::code("成"), &catalog);
    store.set(cell(2, date!(2025 - 03 - 31)), ShiftValue::code("成"), &catalog);

    let removed: usize = store.clear_month(MonthKey::new(2025, Month::March));

    assert_eq!(removed, 2);
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get(cell(1, date!(2025 - 02 - 10)), &catalog),
        ShiftValue::code("成")
    );
}

#[test]
fn test_overlay_writes_unconditionally() {
    let mut store: ShiftStore = ShiftStore::new();
    let key: CellKey = cell(1, date!(2025 - 03 - 05));
    store.overlay(key, ShiftValue::code("成"));
    store.overlay(key, ShiftValue::Unset);

    assert_eq!(store.record(key), Some(&ShiftValue::Unset));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_assignments_in_filters_by_month() {
    let mut store: ShiftStore = ShiftStore::new();
    store.overlay(cell(1, date!(2025 - 02 - 10)), ShiftValue::code("A"));
    store.overlay(cell(1, date!(2025 - 03 - 05)), ShiftValue::code("B"));

    let march: Vec<ShiftAssignment> = store.assignments_in(MonthKey::new(2025, Month::March));
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].date, date!(2025 - 03 - 05));
}

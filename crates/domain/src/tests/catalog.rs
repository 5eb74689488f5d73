// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, ShiftCatalog, ShiftCode, ShiftType, ShiftValue};

fn night_type(code: &str) -> ShiftType {
    ShiftType::new(code, "夜勤", "#111827", Some("22:00-6:00"))
}

#[test]
fn test_default_catalog_has_six_types() {
    let catalog: ShiftCatalog = ShiftCatalog::with_defaults();
    assert_eq!(catalog.types().len(), 6);
    assert!(catalog.find(&ShiftCode::new("成")).is_some());
    assert!(catalog.find(&ShiftCode::new("他")).is_some());
    assert!(catalog.renames().is_empty());
}

#[test]
fn test_add_rejects_duplicate_code() {
    let mut catalog: ShiftCatalog = ShiftCatalog::with_defaults();
    let result: Result<(), DomainError> = catalog.add(night_type("成"));
    assert!(matches!(result, Err(DomainError::DuplicateShiftCode(_))));
}

#[test]
fn test_add_rejects_empty_code() {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    let result: Result<(), DomainError> = catalog.add(night_type("  "));
    assert!(matches!(result, Err(DomainError::EmptyShiftCode)));
}

#[test]
fn test_update_in_place_keeps_rename_map_empty() {
    let mut catalog: ShiftCatalog = ShiftCatalog::with_defaults();
    let replacement: ShiftType = ShiftType::new("成", "成田969", "#000000", Some("13:00-18:00"));
    catalog.update(&ShiftCode::new("成"), replacement).unwrap();

    assert!(catalog.renames().is_empty());
    let updated: &ShiftType = catalog.find(&ShiftCode::new("成")).unwrap();
    assert_eq!(updated.color, "#000000");
}

#[test]
fn test_rename_resolves_stored_code_without_rewrite() {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    catalog.add(night_type("A")).unwrap();

    catalog
        .update(&ShiftCode::new("A"), night_type("B"))
        .unwrap();

    let stored: ShiftValue = ShiftValue::code("A");
    assert_eq!(catalog.resolve(&stored), ShiftValue::code("B"));
    // The stored value itself is untouched; only the read resolves.
    assert_eq!(stored, ShiftValue::code("A"));
}

#[test]
fn test_rename_chain_collapses_to_single_lookup() {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    catalog.add(night_type("A")).unwrap();
    catalog
        .update(&ShiftCode::new("A"), night_type("B"))
        .unwrap();
    catalog
        .update(&ShiftCode::new("B"), night_type("C"))
        .unwrap();

    assert_eq!(catalog.resolve(&ShiftValue::code("A")), ShiftValue::code("C"));
    assert_eq!(catalog.resolve(&ShiftValue::code("B")), ShiftValue::code("C"));
    assert_eq!(catalog.renames().get("A"), Some(&String::from("C")));
}

#[test]
fn test_rename_cycle_leaves_no_mapping() {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    catalog.add(night_type("A")).unwrap();
    catalog
        .update(&ShiftCode::new("A"), night_type("B"))
        .unwrap();
    catalog
        .update(&ShiftCode::new("B"), night_type("A"))
        .unwrap();

    assert_eq!(catalog.resolve(&ShiftValue::code("A")), ShiftValue::code("A"));
    assert_eq!(catalog.resolve(&ShiftValue::code("B")), ShiftValue::code("A"));
    assert!(!catalog.renames().contains_key("A"));
}

#[test]
fn test_rename_rejects_collision_with_existing_type() {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    catalog.add(night_type("A")).unwrap();
    catalog.add(night_type("B")).unwrap();

    let result: Result<(), DomainError> = catalog.update(&ShiftCode::new("A"), night_type("B"));
    assert!(matches!(result, Err(DomainError::DuplicateShiftCode(_))));
}

#[test]
fn test_update_unknown_code_fails() {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    let result: Result<(), DomainError> = catalog.update(&ShiftCode::new("X"), night_type("Y"));
    assert!(matches!(result, Err(DomainError::ShiftTypeNotFound(_))));
}

#[test]
fn test_unset_passes_through_resolution() {
    let mut catalog: ShiftCatalog = ShiftCatalog::new();
    catalog.add(night_type("A")).unwrap();
    catalog
        .update(&ShiftCode::new("A"), night_type("B"))
        .unwrap();

    assert!(catalog.resolve(&ShiftValue::Unset).is_unset());
}

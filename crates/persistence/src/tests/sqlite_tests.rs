// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_grid::{CatalogStore, PersistenceGateway};
use shift_grid_domain::{EmployeeId, Roster, ShiftValue};
use time::macros::date;

use crate::SqliteGateway;
use crate::tests::{create_test_catalog, create_test_roster, february, march, value_of};

#[tokio::test]
async fn test_fresh_database_starts_empty() {
    let gateway = SqliteGateway::open_in_memory().unwrap();

    assert!(gateway.fetch_month(march()).await.unwrap().is_empty());
    assert_eq!(gateway.load_roster().await.unwrap(), None);
    assert_eq!(gateway.load_catalog().await.unwrap(), None);
}

#[tokio::test]
async fn test_upsert_then_fetch_round_trips() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    gateway
        .upsert_cell(EmployeeId::new(3), date!(2025 - 03 - 21), ShiftValue::code("夜"))
        .await
        .unwrap();

    let cells = gateway.fetch_month(march()).await.unwrap();

    assert_eq!(cells.len(), 1);
    assert_eq!(
        value_of(&cells, EmployeeId::new(3), date!(2025 - 03 - 21)),
        Some(ShiftValue::code("夜"))
    );
}

#[tokio::test]
async fn test_repeating_an_upsert_keeps_one_record() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    for _ in 0..3 {
        gateway
            .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 10), ShiftValue::code("早"))
            .await
            .unwrap();
    }

    let cells = gateway.fetch_month(march()).await.unwrap();

    assert_eq!(cells.len(), 1);
    assert_eq!(
        value_of(&cells, EmployeeId::new(1), date!(2025 - 03 - 10)),
        Some(ShiftValue::code("早"))
    );
}

#[tokio::test]
async fn test_changing_a_cell_updates_the_existing_record() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 10), ShiftValue::code("早"))
        .await
        .unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 10), ShiftValue::code("遅"))
        .await
        .unwrap();

    let cells = gateway.fetch_month(march()).await.unwrap();

    assert_eq!(cells.len(), 1);
    assert_eq!(
        value_of(&cells, EmployeeId::new(1), date!(2025 - 03 - 10)),
        Some(ShiftValue::code("遅"))
    );
}

#[tokio::test]
async fn test_unset_cells_are_stored_not_deleted() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 10), ShiftValue::code("早"))
        .await
        .unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 10), ShiftValue::Unset)
        .await
        .unwrap();

    let cells = gateway.fetch_month(march()).await.unwrap();

    assert_eq!(cells.len(), 1);
    assert_eq!(
        value_of(&cells, EmployeeId::new(1), date!(2025 - 03 - 10)),
        Some(ShiftValue::Unset)
    );
}

#[tokio::test]
async fn test_fetch_returns_only_the_requested_month() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 02 - 28), ShiftValue::code("休"))
        .await
        .unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 01), ShiftValue::code("早"))
        .await
        .unwrap();

    let cells = gateway.fetch_month(march()).await.unwrap();

    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].date, date!(2025 - 03 - 01));
}

#[tokio::test]
async fn test_delete_month_removes_only_that_month() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 02 - 28), ShiftValue::code("休"))
        .await
        .unwrap();
    gateway
        .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 01), ShiftValue::code("早"))
        .await
        .unwrap();
    gateway
        .upsert_cell(EmployeeId::new(2), date!(2025 - 03 - 15), ShiftValue::code("遅"))
        .await
        .unwrap();

    gateway.delete_month(march()).await.unwrap();

    assert!(gateway.fetch_month(march()).await.unwrap().is_empty());
    assert_eq!(gateway.fetch_month(february()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_roster_round_trips() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    let roster = create_test_roster();

    gateway.save_roster(&roster).await.unwrap();

    assert_eq!(gateway.load_roster().await.unwrap(), Some(roster));
}

#[tokio::test]
async fn test_saving_a_roster_replaces_the_previous_one() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    gateway.save_roster(&create_test_roster()).await.unwrap();

    let replacement = Roster::with_defaults();
    gateway.save_roster(&replacement).await.unwrap();

    assert_eq!(gateway.load_roster().await.unwrap(), Some(replacement));
}

#[tokio::test]
async fn test_catalog_round_trips_with_renames() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    let catalog = create_test_catalog();

    gateway.save_catalog(&catalog).await.unwrap();
    let loaded = gateway.load_catalog().await.unwrap().expect("catalog was saved");

    assert_eq!(loaded, catalog);
    assert_eq!(loaded.renames().get("早"), Some(&String::from("朝")));
}

#[tokio::test]
async fn test_file_database_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shifts.db");

    {
        let gateway = SqliteGateway::open(&path).unwrap();
        gateway
            .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 10), ShiftValue::code("早"))
            .await
            .unwrap();
        gateway.save_roster(&create_test_roster()).await.unwrap();
    }

    let reopened = SqliteGateway::open(&path).unwrap();

    assert_eq!(reopened.fetch_month(march()).await.unwrap().len(), 1);
    assert_eq!(
        reopened.load_roster().await.unwrap(),
        Some(create_test_roster())
    );
}

#[tokio::test]
async fn test_in_memory_databases_are_isolated() {
    let first = SqliteGateway::open_in_memory().unwrap();
    let second = SqliteGateway::open_in_memory().unwrap();

    first
        .upsert_cell(EmployeeId::new(1), date!(2025 - 03 - 10), ShiftValue::code("早"))
        .await
        .unwrap();

    assert_eq!(first.fetch_month(march()).await.unwrap().len(), 1);
    assert!(second.fetch_month(march()).await.unwrap().is_empty());
}

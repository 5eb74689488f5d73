// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use shift_grid_domain::{
    CellKey, EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftValue,
};
use time::{Date, Month};

use crate::{CatalogStore, GatewayError, PersistenceGateway, SyncConfig, SyncController};

pub fn february() -> MonthKey {
    MonthKey::new(2025, Month::February)
}

pub fn march() -> MonthKey {
    MonthKey::new(2025, Month::March)
}

pub fn april() -> MonthKey {
    MonthKey::new(2025, Month::April)
}

/// Builds a controller on the given gateway, bootstrapped and with March
/// 2025 loaded, its notice buffer drained.
pub async fn ready_controller(
    gateway: FakeGateway,
    config: SyncConfig,
) -> SyncController<FakeGateway> {
    let mut controller: SyncController<FakeGateway> =
        SyncController::new(gateway, march(), config);
    controller
        .bootstrap()
        .await
        .expect("bootstrap should succeed");
    controller
        .load_month(march(), false)
        .await
        .expect("initial load should succeed");
    controller.drain_notices();
    controller
}

#[derive(Debug, Default)]
struct GatewayState {
    rows: BTreeMap<CellKey, ShiftValue>,
    roster: Option<Roster>,
    catalog: Option<ShiftCatalog>,
    fail_fetches: bool,
    fail_upserts: bool,
    fail_deletes: bool,
    fail_saves: bool,
    fetch_calls: usize,
    upsert_calls: usize,
    response_delay: Option<Duration>,
}

/// An in-memory gateway double. Clones share state, so a test can keep one
/// handle for inspection while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, employee: EmployeeId, date: Date, value: ShiftValue) {
        self.lock().rows.insert(CellKey::new(employee, date), value);
    }

    pub fn stored(&self, employee: EmployeeId, date: Date) -> Option<ShiftValue> {
        self.lock().rows.get(&CellKey::new(employee, date)).cloned()
    }

    pub fn row_count(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn put_roster(&self, roster: Roster) {
        self.lock().roster = Some(roster);
    }

    pub fn put_catalog(&self, catalog: ShiftCatalog) {
        self.lock().catalog = Some(catalog);
    }

    pub fn stored_roster(&self) -> Option<Roster> {
        self.lock().roster.clone()
    }

    pub fn stored_catalog(&self) -> Option<ShiftCatalog> {
        self.lock().catalog.clone()
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        self.lock().fail_fetches = fail;
    }

    pub fn set_fail_upserts(&self, fail: bool) {
        self.lock().fail_upserts = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.lock().fail_deletes = fail;
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    pub fn set_response_delay(&self, delay: Duration) {
        self.lock().response_delay = Some(delay);
    }

    pub fn fetch_calls(&self) -> usize {
        self.lock().fetch_calls
    }

    pub fn upsert_calls(&self) -> usize {
        self.lock().upsert_calls
    }

    fn lock(&self) -> MutexGuard<'_, GatewayState> {
        self.state.lock().unwrap()
    }

    async fn pause(&self) {
        let delay: Option<Duration> = self.lock().response_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl PersistenceGateway for FakeGateway {
    async fn fetch_month(&self, month: MonthKey) -> Result<Vec<ShiftAssignment>, GatewayError> {
        self.pause().await;
        let mut state: MutexGuard<'_, GatewayState> = self.lock();
        state.fetch_calls += 1;
        if state.fail_fetches {
            return Err(GatewayError::Unavailable(String::from("fetch disabled")));
        }
        Ok(state
            .rows
            .iter()
            .filter(|(cell, _)| month.contains(cell.date))
            .map(|(cell, value)| ShiftAssignment::new(cell.employee, cell.date, value.clone()))
            .collect())
    }

    async fn upsert_cell(
        &self,
        employee: EmployeeId,
        date: Date,
        value: ShiftValue,
    ) -> Result<(), GatewayError> {
        self.pause().await;
        let mut state: MutexGuard<'_, GatewayState> = self.lock();
        state.upsert_calls += 1;
        if state.fail_upserts {
            return Err(GatewayError::Io(String::from("upsert disabled")));
        }
        state.rows.insert(CellKey::new(employee, date), value);
        Ok(())
    }

    async fn delete_month(&self, month: MonthKey) -> Result<(), GatewayError> {
        self.pause().await;
        let mut state: MutexGuard<'_, GatewayState> = self.lock();
        if state.fail_deletes {
            return Err(GatewayError::Io(String::from("delete disabled")));
        }
        state.rows.retain(|cell, _| !month.contains(cell.date));
        Ok(())
    }
}

impl CatalogStore for FakeGateway {
    async fn load_roster(&self) -> Result<Option<Roster>, GatewayError> {
        Ok(self.lock().roster.clone())
    }

    async fn save_roster(&self, roster: &Roster) -> Result<(), GatewayError> {
        let mut state: MutexGuard<'_, GatewayState> = self.lock();
        if state.fail_saves {
            return Err(GatewayError::Io(String::from("saves disabled")));
        }
        state.roster = Some(roster.clone());
        Ok(())
    }

    async fn load_catalog(&self) -> Result<Option<ShiftCatalog>, GatewayError> {
        Ok(self.lock().catalog.clone())
    }

    async fn save_catalog(&self, catalog: &ShiftCatalog) -> Result<(), GatewayError> {
        let mut state: MutexGuard<'_, GatewayState> = self.lock();
        if state.fail_saves {
            return Err(GatewayError::Io(String::from("saves disabled")));
        }
        state.catalog = Some(catalog.clone());
        Ok(())
    }
}

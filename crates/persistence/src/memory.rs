// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory gateway.
//!
//! Keeps everything in a `BTreeMap` behind a mutex. Nothing survives the
//! process; useful for tests and for running the server without any
//! durable storage.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use shift_grid::{CatalogStore, GatewayError, PersistenceGateway};
use shift_grid_domain::{
    CellKey, EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftValue,
};
use time::Date;

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<CellKey, ShiftValue>,
    roster: Option<Roster>,
    catalog: Option<ShiftCatalog>,
}

/// Shift storage held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
}

impl MemoryGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistenceGateway for MemoryGateway {
    async fn fetch_month(&self, month: MonthKey) -> Result<Vec<ShiftAssignment>, GatewayError> {
        let state = self.lock();
        Ok(state
            .rows
            .iter()
            .filter(|(key, _)| month.contains(key.date))
            .map(|(key, value)| ShiftAssignment::new(key.employee, key.date, value.clone()))
            .collect())
    }

    async fn upsert_cell(
        &self,
        employee: EmployeeId,
        date: Date,
        value: ShiftValue,
    ) -> Result<(), GatewayError> {
        self.lock().rows.insert(CellKey::new(employee, date), value);
        Ok(())
    }

    async fn delete_month(&self, month: MonthKey) -> Result<(), GatewayError> {
        self.lock().rows.retain(|key, _| !month.contains(key.date));
        Ok(())
    }
}

impl CatalogStore for MemoryGateway {
    async fn load_roster(&self) -> Result<Option<Roster>, GatewayError> {
        Ok(self.lock().roster.clone())
    }

    async fn save_roster(&self, roster: &Roster) -> Result<(), GatewayError> {
        self.lock().roster = Some(roster.clone());
        Ok(())
    }

    async fn load_catalog(&self) -> Result<Option<ShiftCatalog>, GatewayError> {
        Ok(self.lock().catalog.clone())
    }

    async fn save_catalog(&self, catalog: &ShiftCatalog) -> Result<(), GatewayError> {
        self.lock().catalog = Some(catalog.clone());
        Ok(())
    }
}

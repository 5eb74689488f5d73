// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::future::Future;

use shift_grid_domain::{
    EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftValue,
};
use time::Date;

use crate::error::GatewayError;

/// Month-scoped access to the backing store for shift assignments.
///
/// The controller is the only caller and bounds every call with its
/// configured I/O timeout. Implementations are shared across the runtime,
/// so the trait requires `Send + Sync` and methods return `Send` futures.
pub trait PersistenceGateway: Send + Sync {
    /// Fetches every stored assignment dated in the given month.
    fn fetch_month(
        &self,
        month: MonthKey,
    ) -> impl Future<Output = Result<Vec<ShiftAssignment>, GatewayError>> + Send;

    /// Inserts or replaces the value of one cell.
    ///
    /// Idempotent: repeating the same (employee, date, value) tuple leaves
    /// exactly one record holding that value. An [`ShiftValue::Unset`] value
    /// stores the unset sentinel rather than deleting the record.
    fn upsert_cell(
        &self,
        employee: EmployeeId,
        date: Date,
        value: ShiftValue,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Physically deletes every assignment dated in the given month.
    fn delete_month(&self, month: MonthKey)
    -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// Access to the long-lived roster and shift-type catalog.
///
/// Kept separate from [`PersistenceGateway`] because these collections are
/// not month-partitioned, but every backend implements both so the
/// composition stays single-backend.
pub trait CatalogStore: Send + Sync {
    /// Loads the stored roster, or `None` when the store holds no employees.
    fn load_roster(&self) -> impl Future<Output = Result<Option<Roster>, GatewayError>> + Send;

    /// Replaces the stored roster.
    fn save_roster(&self, roster: &Roster)
    -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Loads the stored catalog, or `None` when the store holds no types.
    fn load_catalog(
        &self,
    ) -> impl Future<Output = Result<Option<ShiftCatalog>, GatewayError>> + Send;

    /// Replaces the stored catalog, including its rename map.
    fn save_catalog(
        &self,
        catalog: &ShiftCatalog,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

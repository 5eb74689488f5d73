// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use shift_grid_domain::{
    CellKey, DomainError, EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftCode,
    ShiftType, ShiftValue,
};
use time::Date;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::cache::MonthCache;
use crate::config::{FlushPolicy, SyncConfig};
use crate::error::{GatewayError, SyncError};
use crate::gateway::{CatalogStore, PersistenceGateway};
use crate::notice::Notice;
use crate::queue::{PendingChange, PendingChangeQueue};
use crate::snapshot::GridSnapshot;
use crate::store::ShiftStore;

/// Load progress of one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthState {
    /// Nothing loaded for this month.
    NotLoaded,
    /// A fetch is in flight.
    Loading,
    /// The month's records are in the store.
    Loaded,
}

/// How a [`SyncController::load_month`] call was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The month was already active and loaded; nothing happened.
    AlreadyLoaded,
    /// A fresh cache entry supplied the records without a fetch.
    FromCache,
    /// The records were fetched from the backing store.
    Fetched,
}

/// How a [`SyncController::edit_cell`] call was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The new value equals the current resolved value; nothing happened.
    Unchanged,
    /// The edit was applied locally and queued for persistence.
    Queued,
    /// The edit was applied and a flush ran immediately.
    Flushed(FlushReport),
}

/// Outcome counts of one flush pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Queue entries successfully persisted.
    pub saved: usize,
    /// Queue entries that failed and remain queued for retry.
    pub failed: usize,
}

/// Direction of a month switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthDirection {
    /// Move to the preceding month.
    Previous,
    /// Move to the following month.
    Next,
}

/// Orchestrates fetch-on-demand, optimistic mutation, queued persistence,
/// and failure recovery for the grid.
///
/// The controller exclusively owns the store, cache, queue, catalog, and
/// roster; every mutation funnels through its methods, so holding the
/// controller (in the server: behind one async mutex) serializes all state
/// changes. Failed saves keep their optimistic value and stay queued for
/// retry; no operation rolls the grid back.
pub struct SyncController<G> {
    gateway: G,
    config: SyncConfig,
    store: ShiftStore,
    cache: MonthCache,
    queue: PendingChangeQueue,
    catalog: ShiftCatalog,
    roster: Roster,
    month_states: BTreeMap<MonthKey, MonthState>,
    active_month: MonthKey,
    notices: Vec<Notice>,
    flush_deadline: Option<Instant>,
    busy: bool,
}

impl<G> SyncController<G>
where
    G: PersistenceGateway + CatalogStore,
{
    /// Creates a controller over the given gateway, starting on
    /// `active_month` with nothing loaded.
    #[must_use]
    pub const fn new(gateway: G, active_month: MonthKey, config: SyncConfig) -> Self {
        Self {
            gateway,
            store: ShiftStore::new(),
            cache: MonthCache::new(config.cache_ttl),
            queue: PendingChangeQueue::new(),
            catalog: ShiftCatalog::new(),
            roster: Roster::new(),
            month_states: BTreeMap::new(),
            active_month,
            notices: Vec::new(),
            flush_deadline: None,
            busy: false,
            config,
        }
    }

    /// Loads the roster and catalog from the backing store, seeding and
    /// persisting the defaults for whichever is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if either load fails; seeding-save failures are
    /// surfaced as notices instead, with the seeded data kept in memory.
    pub async fn bootstrap(&mut self) -> Result<(), SyncError> {
        let stored: Option<Roster> =
            bounded(self.config.io_timeout, self.gateway.load_roster()).await?;
        let seed_roster: bool = stored.is_none();
        self.roster = stored.unwrap_or_else(Roster::with_defaults);
        if seed_roster {
            info!("No stored roster; seeding the default employee list");
            self.persist_roster().await;
        }

        let stored: Option<ShiftCatalog> =
            bounded(self.config.io_timeout, self.gateway.load_catalog()).await?;
        let seed_catalog: bool = stored.is_none();
        self.catalog = stored.unwrap_or_else(ShiftCatalog::with_defaults);
        if seed_catalog {
            info!("No stored catalog; seeding the default shift types");
            self.persist_catalog().await;
        }
        Ok(())
    }

    /// Makes `month` the active month, satisfying the read from the cache
    /// when it holds a fresh entry and fetching otherwise. Pending edits
    /// for the month are re-applied on top of the populated records, so
    /// unflushed optimistic values survive a (re)load.
    ///
    /// `force` invalidates the cache entry first and always re-fetches.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the month reverts to not
    /// loaded, local state is otherwise unchanged, and a load-failed
    /// notice is buffered.
    pub async fn load_month(
        &mut self,
        month: MonthKey,
        force: bool,
    ) -> Result<LoadOutcome, SyncError> {
        if !force && self.active_month == month && self.state_of(month) == MonthState::Loaded {
            return Ok(LoadOutcome::AlreadyLoaded);
        }
        if force {
            self.cache.invalidate(month);
        }
        if let Some(cached) = self.cache.lookup(month).map(<[ShiftAssignment]>::to_vec) {
            self.install_month(month, cached);
            debug!("Loaded {month} from the cache");
            return Ok(LoadOutcome::FromCache);
        }

        self.month_states.insert(month, MonthState::Loading);
        self.busy = true;
        let fetched: Result<Vec<ShiftAssignment>, GatewayError> =
            bounded(self.config.io_timeout, self.gateway.fetch_month(month)).await;
        self.busy = false;

        match fetched {
            Ok(assignments) => {
                self.cache.store(month, assignments.clone());
                self.install_month(month, assignments);
                info!("Fetched {month} from the backing store");
                Ok(LoadOutcome::Fetched)
            }
            Err(error) => {
                self.month_states.insert(month, MonthState::NotLoaded);
                warn!("Failed to load {month}: {error}");
                self.push_notice(Notice::error(format!("Failed to load {month}: {error}")));
                Err(SyncError::Gateway(error))
            }
        }
    }

    /// Applies one cell edit optimistically and queues it for persistence.
    ///
    /// The store is mutated synchronously before any I/O; an edit landing
    /// while a flush is in flight simply overwrites the queued value, and
    /// the flush's exact-value confirmation keeps it dirty. Redundant
    /// edits (equal to the current resolved value) do nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is unknown or the date falls
    /// outside the active loaded month.
    pub async fn edit_cell(
        &mut self,
        employee: EmployeeId,
        date: Date,
        value: ShiftValue,
    ) -> Result<EditOutcome, SyncError> {
        if !self.roster.contains(employee) {
            return Err(SyncError::Domain(DomainError::EmployeeNotFound(
                employee.value(),
            )));
        }
        let month: MonthKey = MonthKey::from_date(date);
        if self.active_month != month || self.state_of(month) != MonthState::Loaded {
            return Err(SyncError::MonthNotLoaded(month));
        }

        let cell: CellKey = CellKey::new(employee, date);
        if !self.store.set(cell, value.clone(), &self.catalog) {
            return Ok(EditOutcome::Unchanged);
        }
        self.queue.add(cell, value);
        debug!("Queued edit of {cell}; {} cell(s) dirty", self.queue.len());

        match self.config.flush_policy {
            FlushPolicy::Immediate => Ok(EditOutcome::Flushed(self.flush().await)),
            FlushPolicy::Debounced(window) => {
                self.flush_deadline = Some(Instant::now() + window);
                Ok(EditOutcome::Queued)
            }
            FlushPolicy::Manual => Ok(EditOutcome::Queued),
        }
    }

    /// Pushes every queued change to the backing store, sequentially.
    ///
    /// Each success is confirmed out of the queue and patched into the
    /// cache; each failure stays queued with its optimistic value intact.
    /// Partial failure is tolerated. Exactly one notice is buffered per
    /// flush that did any work: save-failed with counts if anything
    /// failed, otherwise saved.
    pub async fn flush(&mut self) -> FlushReport {
        self.flush_deadline = None;
        let changes: Vec<PendingChange> = self.queue.snapshot();
        if changes.is_empty() {
            return FlushReport::default();
        }

        let total: usize = changes.len();
        let mut report: FlushReport = FlushReport::default();
        self.busy = true;
        for change in changes {
            let result: Result<(), GatewayError> = bounded(
                self.config.io_timeout,
                self.gateway
                    .upsert_cell(change.cell.employee, change.cell.date, change.value.clone()),
            )
            .await;
            match result {
                Ok(()) => {
                    if self.queue.confirm(change.cell, &change.value) {
                        let month: MonthKey = MonthKey::from_date(change.cell.date);
                        self.cache.apply(month, change.cell, change.value);
                    }
                    report.saved += 1;
                }
                Err(error) => {
                    warn!("Failed to save {}: {error}", change.cell);
                    report.failed += 1;
                }
            }
        }
        self.busy = false;

        if report.failed > 0 {
            self.push_notice(Notice::error(format!(
                "Failed to save {} of {total} change(s); they remain queued for retry",
                report.failed
            )));
        } else {
            self.push_notice(Notice::info(format!("Saved {} change(s)", report.saved)));
        }
        report
    }

    /// Runs a flush when the debounce deadline has passed.
    ///
    /// The deadline restarts on every edit, so this returns `None` until
    /// an edit burst has gone quiet for the configured window.
    pub async fn flush_if_due(&mut self, now: Instant) -> Option<FlushReport> {
        let deadline: Instant = self.flush_deadline?;
        if now < deadline {
            return None;
        }
        Some(self.flush().await)
    }

    /// Returns when the next debounced flush is due, if one is armed.
    #[must_use]
    pub const fn next_flush_deadline(&self) -> Option<Instant> {
        self.flush_deadline
    }

    /// Deletes every stored assignment of one month, then clears the
    /// month's store records, pending changes, and cache entry. Other
    /// months are untouched. Returns how many store records were cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing delete fails; local state is left
    /// exactly as it was and a delete-failed notice is buffered.
    pub async fn delete_all(&mut self, month: MonthKey) -> Result<usize, SyncError> {
        self.busy = true;
        let result: Result<(), GatewayError> =
            bounded(self.config.io_timeout, self.gateway.delete_month(month)).await;
        self.busy = false;

        match result {
            Ok(()) => {
                let removed: usize = self.store.clear_month(month);
                let dropped: usize = self.queue.clear_month(month);
                self.cache.invalidate(month);
                info!("Deleted {month}: {removed} store record(s), {dropped} pending change(s)");
                self.push_notice(Notice::info(format!("Deleted all shifts for {month}")));
                Ok(removed)
            }
            Err(error) => {
                warn!("Failed to delete {month}: {error}");
                self.push_notice(Notice::error(format!("Failed to delete {month}: {error}")));
                Err(SyncError::Gateway(error))
            }
        }
    }

    /// Flushes pending changes, then moves the active month one step and
    /// loads it. Changes that fail to flush stay queued across the switch
    /// rather than being dropped. With prefetch enabled, the next month in
    /// the same direction is additionally warmed into the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the step leaves the supported calendar range or
    /// the target month fails to load.
    pub async fn change_month(
        &mut self,
        direction: MonthDirection,
    ) -> Result<LoadOutcome, SyncError> {
        let report: FlushReport = self.flush().await;
        if report.failed > 0 {
            debug!(
                "{} change(s) remain queued across the month switch",
                report.failed
            );
        }

        let target: MonthKey = match direction {
            MonthDirection::Previous => self.active_month.previous()?,
            MonthDirection::Next => self.active_month.next()?,
        };
        let outcome: LoadOutcome = self.load_month(target, false).await?;

        if self.config.prefetch_adjacent {
            let adjacent: Result<MonthKey, DomainError> = match direction {
                MonthDirection::Previous => target.previous(),
                MonthDirection::Next => target.next(),
            };
            if let Ok(adjacent) = adjacent {
                self.prefetch(adjacent).await;
            }
        }
        Ok(outcome)
    }

    /// Adds an employee to the roster and persists the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the name fails validation. A persistence
    /// failure keeps the local add and buffers an error notice instead.
    pub async fn add_employee(
        &mut self,
        family_name: String,
        given_name: Option<String>,
    ) -> Result<EmployeeId, SyncError> {
        let id: EmployeeId = self.roster.add(family_name, given_name)?;
        info!("Added employee {id}");
        self.persist_roster().await;
        Ok(id)
    }

    /// Replaces an employee's names and persists the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown or the name fails validation.
    pub async fn update_employee(
        &mut self,
        id: EmployeeId,
        family_name: String,
        given_name: Option<String>,
    ) -> Result<(), SyncError> {
        self.roster.update(id, family_name, given_name)?;
        self.persist_roster().await;
        Ok(())
    }

    /// Adds a shift type to the catalog and persists the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or already in use.
    pub async fn add_shift_type(&mut self, definition: ShiftType) -> Result<(), SyncError> {
        self.catalog.add(definition)?;
        self.persist_catalog().await;
        Ok(())
    }

    /// Replaces a shift type's definition and persists the catalog. A code
    /// change records a rename, so assignments stored under the old code
    /// resolve to the new one at read time without being rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is unknown or the replacement code
    /// collides with another type.
    pub async fn update_shift_type(
        &mut self,
        code: &ShiftCode,
        replacement: ShiftType,
    ) -> Result<(), SyncError> {
        self.catalog.update(code, replacement)?;
        self.persist_catalog().await;
        Ok(())
    }

    /// Builds a read-only snapshot of the active month for exports and the
    /// HTTP read path.
    ///
    /// # Errors
    ///
    /// Returns an error if the active month is not loaded or its day
    /// range cannot be materialized.
    pub fn snapshot(&self) -> Result<GridSnapshot, SyncError> {
        let month: MonthKey = self.active_month;
        if self.state_of(month) != MonthState::Loaded {
            return Err(SyncError::MonthNotLoaded(month));
        }
        let days: Vec<Date> = month.days()?;
        let mut cells: BTreeMap<CellKey, ShiftValue> = BTreeMap::new();
        for assignment in self.store.assignments_in(month) {
            let resolved: ShiftValue = self.catalog.resolve(&assignment.value);
            if !resolved.is_unset() {
                cells.insert(assignment.cell(), resolved);
            }
        }
        Ok(GridSnapshot::new(
            month,
            days,
            self.roster.employees().to_vec(),
            self.catalog.types().to_vec(),
            cells,
        ))
    }

    /// Reads one cell's resolved value from the store.
    #[must_use]
    pub fn value_at(&self, employee: EmployeeId, date: Date) -> ShiftValue {
        self.store.get(CellKey::new(employee, date), &self.catalog)
    }

    /// Returns the month currently presented by the grid.
    #[must_use]
    pub const fn active_month(&self) -> MonthKey {
        self.active_month
    }

    /// Returns the load state of a month.
    #[must_use]
    pub fn state_of(&self, month: MonthKey) -> MonthState {
        self.month_states
            .get(&month)
            .copied()
            .unwrap_or(MonthState::NotLoaded)
    }

    /// Returns the number of cells awaiting persistence.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns the pending changes, dirtiest-first by cell order.
    #[must_use]
    pub fn pending(&self) -> Vec<PendingChange> {
        self.queue.snapshot()
    }

    /// Returns true while a gateway operation is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the active shift-type catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    /// Returns the employee roster.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the controller's configuration.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Takes the buffered notices, leaving the buffer empty.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetches a month straight into the cache without touching the store.
    /// Failures are ignored beyond a debug log; prefetching is purely a
    /// warm-up.
    async fn prefetch(&mut self, month: MonthKey) {
        if self.cache.lookup(month).is_some() {
            return;
        }
        match bounded(self.config.io_timeout, self.gateway.fetch_month(month)).await {
            Ok(assignments) => {
                debug!("Prefetched {month} into the cache");
                self.cache.store(month, assignments);
            }
            Err(error) => debug!("Prefetch of {month} failed: {error}"),
        }
    }

    fn install_month(&mut self, month: MonthKey, assignments: Vec<ShiftAssignment>) {
        if self.active_month != month {
            self.store.clear_month(self.active_month);
        }
        self.store.populate_month(month, assignments);
        for change in self.queue.snapshot() {
            if month.contains(change.cell.date) {
                self.store.overlay(change.cell, change.value);
            }
        }
        self.active_month = month;
        self.month_states.insert(month, MonthState::Loaded);
    }

    async fn persist_roster(&mut self) {
        let result: Result<(), GatewayError> = bounded(
            self.config.io_timeout,
            self.gateway.save_roster(&self.roster),
        )
        .await;
        if let Err(error) = result {
            warn!("Failed to persist the roster: {error}");
            self.push_notice(Notice::error(format!(
                "Failed to save the employee list: {error}"
            )));
        }
    }

    async fn persist_catalog(&mut self) {
        let result: Result<(), GatewayError> = bounded(
            self.config.io_timeout,
            self.gateway.save_catalog(&self.catalog),
        )
        .await;
        if let Err(error) = result {
            warn!("Failed to persist the shift-type catalog: {error}");
            self.push_notice(Notice::error(format!(
                "Failed to save the shift types: {error}"
            )));
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Bounds a gateway call with the configured I/O timeout; an elapsed timer
/// is reported as a [`GatewayError::Timeout`].
async fn bounded<T, F>(limit: Duration, operation: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    timeout(limit, operation)
        .await
        .unwrap_or(Err(GatewayError::Timeout(limit)))
}

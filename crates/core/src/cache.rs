// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use shift_grid_domain::{CellKey, MonthKey, ShiftAssignment, ShiftValue};

#[derive(Debug, Clone)]
struct CachedMonth {
    assignments: Vec<ShiftAssignment>,
    fetched_at: Instant,
}

/// Time-boxed, month-keyed cache of fetched grids.
///
/// An entry is valid strictly less than the TTL after it was stored: a
/// lookup exactly at the boundary is a miss. Time enters through explicit
/// `*_at` variants so the boundary is testable; the plain variants use the
/// current instant.
#[derive(Debug, Clone)]
pub struct MonthCache {
    ttl: Duration,
    entries: BTreeMap<MonthKey, CachedMonth>,
}

impl MonthCache {
    /// Creates an empty cache with the given entry lifetime.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: BTreeMap::new(),
        }
    }

    /// Returns the configured entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up a month's cached assignments, treating the current instant
    /// as now.
    #[must_use]
    pub fn lookup(&self, month: MonthKey) -> Option<&[ShiftAssignment]> {
        self.lookup_at(month, Instant::now())
    }

    /// Looks up a month's cached assignments as of `at`. Misses when the
    /// month is absent or its age has reached the TTL.
    #[must_use]
    pub fn lookup_at(&self, month: MonthKey, at: Instant) -> Option<&[ShiftAssignment]> {
        let entry: &CachedMonth = self.entries.get(&month)?;
        if at.duration_since(entry.fetched_at) < self.ttl {
            Some(&entry.assignments)
        } else {
            None
        }
    }

    /// Stores a month's assignments with a fresh timestamp.
    pub fn store(&mut self, month: MonthKey, assignments: Vec<ShiftAssignment>) {
        self.store_at(month, assignments, Instant::now());
    }

    /// Stores a month's assignments as fetched at `at`, replacing any
    /// previous entry.
    pub fn store_at(&mut self, month: MonthKey, assignments: Vec<ShiftAssignment>, at: Instant) {
        self.entries.insert(
            month,
            CachedMonth {
                assignments,
                fetched_at: at,
            },
        );
    }

    /// Patches one cell inside a cached month after a confirmed upsert.
    ///
    /// The entry's timestamp is left alone: a patch keeps the cached data
    /// consistent with the store but does not make the fetch any younger.
    /// Months not in the cache are ignored.
    pub fn apply(&mut self, month: MonthKey, cell: CellKey, value: ShiftValue) {
        let Some(entry) = self.entries.get_mut(&month) else {
            return;
        };
        if let Some(existing) = entry
            .assignments
            .iter_mut()
            .find(|a| a.employee_id == cell.employee && a.date == cell.date)
        {
            existing.value = value;
            return;
        }
        entry
            .assignments
            .push(ShiftAssignment::new(cell.employee, cell.date, value));
    }

    /// Drops a month's entry, returning whether one was present.
    pub fn invalidate(&mut self, month: MonthKey) -> bool {
        self.entries.remove(&month).is_some()
    }

    /// Returns true when the month has an entry, fresh or not.
    #[must_use]
    pub fn contains(&self, month: MonthKey) -> bool {
        self.entries.contains_key(&month)
    }
}

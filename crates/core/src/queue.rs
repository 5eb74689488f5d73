// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use shift_grid_domain::{CellKey, MonthKey, ShiftValue};

/// One not-yet-persisted cell edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    /// The edited cell.
    pub cell: CellKey,
    /// The value awaiting persistence.
    pub value: ShiftValue,
}

/// The set of dirty cells awaiting persistence, keyed by cell.
///
/// Later edits to the same cell overwrite the queued value in place
/// (last-write-wins within the session), so a burst of edits to one cell
/// reaches the gateway as a single upsert. Entries leave the queue only
/// through [`confirm`](Self::confirm) or a month clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChangeQueue {
    changes: BTreeMap<CellKey, ShiftValue>,
}

impl PendingChangeQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: BTreeMap::new(),
        }
    }

    /// Inserts or overwrites the pending value for a cell.
    pub fn add(&mut self, cell: CellKey, value: ShiftValue) {
        self.changes.insert(cell, value);
    }

    /// Returns the pending value for a cell, if any.
    #[must_use]
    pub fn get(&self, cell: CellKey) -> Option<&ShiftValue> {
        self.changes.get(&cell)
    }

    /// Returns true when the cell has a pending change.
    #[must_use]
    pub fn contains(&self, cell: CellKey) -> bool {
        self.changes.contains_key(&cell)
    }

    /// Returns the pending changes without clearing them. Entries are
    /// removed only when their persistence is confirmed.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PendingChange> {
        self.changes
            .iter()
            .map(|(cell, value)| PendingChange {
                cell: *cell,
                value: value.clone(),
            })
            .collect()
    }

    /// Confirms that `flushed` was persisted for the cell, removing the
    /// entry only if it still holds exactly that value. An edit made while
    /// the flush was in flight leaves a newer value behind, and that value
    /// stays queued.
    pub fn confirm(&mut self, cell: CellKey, flushed: &ShiftValue) -> bool {
        match self.changes.get(&cell) {
            Some(current) if current == flushed => {
                self.changes.remove(&cell);
                true
            }
            _ => false,
        }
    }

    /// Drops every pending change dated in the given month, returning how
    /// many were dropped. Used after a confirmed month delete.
    pub fn clear_month(&mut self, month: MonthKey) -> usize {
        let before: usize = self.changes.len();
        self.changes.retain(|cell, _| !month.contains(cell.date));
        before - self.changes.len()
    }

    /// Returns the number of dirty cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true when nothing is awaiting persistence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runtime backend selection.
//!
//! [`Backend`] wraps the concrete gateways in one enum implementing both
//! storage traits, so a caller can pick a backend from configuration
//! without carrying generics through its own types.

use std::path::{Path, PathBuf};

use shift_grid::{CatalogStore, GatewayError, PersistenceGateway};
use shift_grid_domain::{EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftValue};
use time::Date;

use crate::error::PersistenceError;
use crate::local_store::LocalStoreGateway;
use crate::memory::MemoryGateway;
use crate::sqlite::SqliteGateway;

/// Macro to forward one gateway call to whichever backend is active.
///
/// The macro ONLY duplicates the call per variant; no logic or branching
/// occurs within it. Each arm resolves to the monomorphic method of that
/// variant's gateway type.
macro_rules! dispatch {
    ($self:ident . $method:ident ( $($arg:expr),* )) => {
        match $self {
            Self::Memory(gateway) => gateway.$method($($arg),*).await,
            Self::LocalStore(gateway) => gateway.$method($($arg),*).await,
            Self::Sqlite(gateway) => gateway.$method($($arg),*).await,
        }
    };
}

/// A storage backend chosen at runtime.
pub enum Backend {
    /// Volatile in-memory storage.
    Memory(MemoryGateway),
    /// JSON documents in a directory.
    LocalStore(LocalStoreGateway),
    /// A `SQLite` database.
    Sqlite(SqliteGateway),
}

impl Backend {
    /// Creates an in-memory backend.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryGateway::new())
    }

    /// Creates a document store backend rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn local_store<P: Into<PathBuf>>(dir: P) -> Result<Self, PersistenceError> {
        Ok(Self::LocalStore(LocalStoreGateway::open(dir)?))
    }

    /// Creates a file-based `SQLite` backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn sqlite<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        Ok(Self::Sqlite(SqliteGateway::open(path)?))
    }

    /// Creates an in-memory `SQLite` backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn sqlite_in_memory() -> Result<Self, PersistenceError> {
        Ok(Self::Sqlite(SqliteGateway::open_in_memory()?))
    }
}

impl PersistenceGateway for Backend {
    async fn fetch_month(&self, month: MonthKey) -> Result<Vec<ShiftAssignment>, GatewayError> {
        dispatch!(self.fetch_month(month))
    }

    async fn upsert_cell(
        &self,
        employee: EmployeeId,
        date: Date,
        value: ShiftValue,
    ) -> Result<(), GatewayError> {
        dispatch!(self.upsert_cell(employee, date, value))
    }

    async fn delete_month(&self, month: MonthKey) -> Result<(), GatewayError> {
        dispatch!(self.delete_month(month))
    }
}

impl CatalogStore for Backend {
    async fn load_roster(&self) -> Result<Option<Roster>, GatewayError> {
        dispatch!(self.load_roster())
    }

    async fn save_roster(&self, roster: &Roster) -> Result<(), GatewayError> {
        dispatch!(self.save_roster(roster))
    }

    async fn load_catalog(&self) -> Result<Option<ShiftCatalog>, GatewayError> {
        dispatch!(self.load_catalog())
    }

    async fn save_catalog(&self, catalog: &ShiftCatalog) -> Result<(), GatewayError> {
        dispatch!(self.save_catalog(catalog))
    }
}

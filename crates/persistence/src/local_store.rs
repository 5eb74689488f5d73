// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON document store gateway.
//!
//! Persists grid data as pretty-printed JSON documents in a directory:
//! one `shiftgrid_shifts_<YYYY-MM>.json` document per month of shift
//! entries, plus `shiftgrid_employees.json` and
//! `shiftgrid_shift_types.json` for the roster and the catalog. The
//! layout mirrors the key-per-month scheme browsers use for local
//! storage, so exported data stays easy to inspect and edit by hand.
//!
//! Writers replace whole documents via a temp file and rename; the last
//! writer wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shift_grid::{CatalogStore, GatewayError, PersistenceGateway};
use shift_grid_domain::{
    EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftValue, format_iso_date,
    parse_iso_date,
};
use time::Date;
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Document name prefix shared by every file this gateway writes.
const STORE_PREFIX: &str = "shiftgrid";

/// One persisted cell, as stored inside a month document.
#[derive(Debug, Serialize, Deserialize)]
struct StoredShift {
    id: i64,
    employee_id: i64,
    date: String,
    shift_code: String,
}

/// Shift storage backed by JSON documents on disk.
#[derive(Debug, Clone)]
pub struct LocalStoreGateway {
    dir: PathBuf,
}

impl LocalStoreGateway {
    /// Opens a document store rooted at `dir`, creating the directory if
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("Opened document store at: {}", dir.display());
        Ok(Self { dir })
    }

    fn shifts_path(&self, month: MonthKey) -> PathBuf {
        self.dir.join(format!("{STORE_PREFIX}_shifts_{month}.json"))
    }

    fn roster_path(&self) -> PathBuf {
        self.dir.join(format!("{STORE_PREFIX}_employees.json"))
    }

    fn catalog_path(&self) -> PathBuf {
        self.dir.join(format!("{STORE_PREFIX}_shift_types.json"))
    }

    fn fetch_rows(&self, month: MonthKey) -> Result<Vec<ShiftAssignment>, PersistenceError> {
        let rows: Vec<StoredShift> = read_document(&self.shifts_path(month))?.unwrap_or_default();

        let mut cells: Vec<ShiftAssignment> = Vec::with_capacity(rows.len());
        for row in rows {
            let date: Date = parse_iso_date(&row.date)?;
            if !month.contains(date) {
                continue;
            }
            cells.push(ShiftAssignment::new(
                EmployeeId::new(row.employee_id),
                date,
                ShiftValue::from_storage(&row.shift_code),
            ));
        }
        Ok(cells)
    }

    fn upsert_row(
        &self,
        employee: EmployeeId,
        date: Date,
        value: &ShiftValue,
    ) -> Result<(), PersistenceError> {
        let month = MonthKey::from_date(date);
        let path = self.shifts_path(month);
        let date_text = format_iso_date(date);
        let code_text = value.as_storage();

        let mut rows: Vec<StoredShift> = read_document(&path)?.unwrap_or_default();

        let mut replaced = false;
        for row in &mut rows {
            if row.employee_id == employee.value() && row.date == date_text {
                row.shift_code = code_text.to_string();
                replaced = true;
            }
        }
        if !replaced {
            let next_id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
            rows.push(StoredShift {
                id: next_id,
                employee_id: employee.value(),
                date: date_text,
                shift_code: code_text.to_string(),
            });
        }

        write_document(&path, &rows)
    }

    fn delete_rows(&self, month: MonthKey) -> Result<(), PersistenceError> {
        let path = self.shifts_path(month);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted shift document for {month}");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PersistenceGateway for LocalStoreGateway {
    async fn fetch_month(&self, month: MonthKey) -> Result<Vec<ShiftAssignment>, GatewayError> {
        debug!("Reading shift document for {month}");
        Ok(self.fetch_rows(month)?)
    }

    async fn upsert_cell(
        &self,
        employee: EmployeeId,
        date: Date,
        value: ShiftValue,
    ) -> Result<(), GatewayError> {
        Ok(self.upsert_row(employee, date, &value)?)
    }

    async fn delete_month(&self, month: MonthKey) -> Result<(), GatewayError> {
        Ok(self.delete_rows(month)?)
    }
}

impl CatalogStore for LocalStoreGateway {
    async fn load_roster(&self) -> Result<Option<Roster>, GatewayError> {
        Ok(read_document(&self.roster_path())?)
    }

    async fn save_roster(&self, roster: &Roster) -> Result<(), GatewayError> {
        debug!("Saving roster with {} employees", roster.len());
        Ok(write_document(&self.roster_path(), roster)?)
    }

    async fn load_catalog(&self) -> Result<Option<ShiftCatalog>, GatewayError> {
        Ok(read_document(&self.catalog_path())?)
    }

    async fn save_catalog(&self, catalog: &ShiftCatalog) -> Result<(), GatewayError> {
        debug!("Saving catalog with {} shift types", catalog.types().len());
        Ok(write_document(&self.catalog_path(), catalog)?)
    }
}

/// Reads and parses a JSON document, mapping a missing file to `None`.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Serializes `value` and replaces the document at `path` atomically.
fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel-backed `SQLite` gateway.
//!
//! Backend-specific code in this module is limited to connection
//! initialization, migration execution, and `SQLite` PRAGMA configuration.
//! All queries and mutations go through the Diesel DSL.
//!
//! Each cell is one row of `shift_entries`, keyed by `(employee_id, date)`.
//! Cleared cells store the unset glyph instead of being deleted, so a
//! cleared cell stays distinguishable from one that was never written.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use shift_grid::{CatalogStore, GatewayError, PersistenceGateway};
use shift_grid_domain::{
    Employee, EmployeeId, MonthKey, Roster, ShiftAssignment, ShiftCatalog, ShiftType, ShiftValue,
    format_iso_date, parse_iso_date,
};
use time::Date;
use tracing::{debug, info};

use crate::diesel_schema::{employees, shift_entries, shift_renames, shift_types};
use crate::error::PersistenceError;

/// Embedded `SQLite` migrations, applied on every new connection.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to [`SqliteGateway::open_in_memory`] receives a sequential ID,
/// keeping concurrently running tests isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Insertable)]
#[diesel(table_name = shift_entries)]
struct NewShiftEntry<'a> {
    employee_id: i64,
    date: &'a str,
    shift_code: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = employees)]
struct NewEmployee<'a> {
    employee_id: i64,
    family_name: &'a str,
    given_name: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = shift_types)]
struct NewShiftType<'a> {
    code: &'a str,
    label: &'a str,
    color: &'a str,
    hours: Option<&'a str>,
    sort_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = shift_renames)]
struct NewRename<'a> {
    old_code: &'a str,
    new_code: &'a str,
}

/// Shift storage backed by a `SQLite` database.
///
/// The connection lives behind a mutex; every operation runs to completion
/// while holding it, so the gateway is safe to share across tasks.
pub struct SqliteGateway {
    conn: Mutex<SqliteConnection>,
}

impl SqliteGateway {
    /// Opens (or creates) a file-based database at `path` and applies
    /// pending migrations.
    ///
    /// WAL mode is enabled for better read concurrency.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_text = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::ConnectionFailed("database path is not valid UTF-8".to_string())
        })?;

        let mut conn: SqliteConnection = initialize_database(path_text)?;
        enable_wal_mode(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a unique shared in-memory database and applies pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are
        // isolated. The atomic counter avoids time-based collisions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("shiftgrid_mem_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = initialize_database(&shared_memory_url)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fetch_rows(&self, month: MonthKey) -> Result<Vec<ShiftAssignment>, PersistenceError> {
        let pattern = format!("{month}-%");
        let mut guard = self.lock();

        let rows: Vec<(i64, String, String)> = shift_entries::table
            .filter(shift_entries::date.like(pattern))
            .order((shift_entries::date.asc(), shift_entries::employee_id.asc()))
            .select((
                shift_entries::employee_id,
                shift_entries::date,
                shift_entries::shift_code,
            ))
            .load(&mut *guard)?;

        let mut cells: Vec<ShiftAssignment> = Vec::with_capacity(rows.len());
        for (employee_id, date_text, code_text) in rows {
            let date: Date = parse_iso_date(&date_text)?;
            cells.push(ShiftAssignment::new(
                EmployeeId::new(employee_id),
                date,
                ShiftValue::from_storage(&code_text),
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
        let date_text = format_iso_date(date);
        let code_text = value.as_storage();
        let mut guard = self.lock();

        guard.transaction(|conn| {
            let updated = diesel::update(
                shift_entries::table
                    .filter(shift_entries::employee_id.eq(employee.value()))
                    .filter(shift_entries::date.eq(&date_text)),
            )
            .set(shift_entries::shift_code.eq(code_text))
            .execute(conn)?;

            if updated == 0 {
                diesel::insert_into(shift_entries::table)
                    .values(&NewShiftEntry {
                        employee_id: employee.value(),
                        date: &date_text,
                        shift_code: code_text,
                    })
                    .execute(conn)?;
            }
            Ok(())
        })
    }

    fn delete_rows(&self, month: MonthKey) -> Result<usize, PersistenceError> {
        let pattern = format!("{month}-%");
        let mut guard = self.lock();

        let removed = diesel::delete(shift_entries::table.filter(shift_entries::date.like(pattern)))
            .execute(&mut *guard)?;
        Ok(removed)
    }

    fn read_roster(&self) -> Result<Option<Roster>, PersistenceError> {
        let mut guard = self.lock();

        let rows: Vec<(i64, String, Option<String>)> = employees::table
            .order(employees::employee_id.asc())
            .select((
                employees::employee_id,
                employees::family_name,
                employees::given_name,
            ))
            .load(&mut *guard)?;

        if rows.is_empty() {
            return Ok(None);
        }

        let members: Vec<Employee> = rows
            .into_iter()
            .map(|(id, family_name, given_name)| {
                Employee::new(EmployeeId::new(id), family_name, given_name)
            })
            .collect();
        Ok(Some(Roster::from_employees(members)))
    }

    fn write_roster(&self, roster: &Roster) -> Result<(), PersistenceError> {
        let mut guard = self.lock();

        guard.transaction(|conn| {
            diesel::delete(employees::table).execute(conn)?;

            let rows: Vec<NewEmployee<'_>> = roster
                .employees()
                .iter()
                .map(|employee| NewEmployee {
                    employee_id: employee.id.value(),
                    family_name: employee.family_name.as_str(),
                    given_name: employee.given_name.as_deref(),
                })
                .collect();
            diesel::insert_into(employees::table)
                .values(&rows)
                .execute(conn)?;
            Ok(())
        })
    }

    fn read_catalog(&self) -> Result<Option<ShiftCatalog>, PersistenceError> {
        let mut guard = self.lock();

        let type_rows: Vec<(String, String, String, Option<String>)> = shift_types::table
            .order(shift_types::sort_order.asc())
            .select((
                shift_types::code,
                shift_types::label,
                shift_types::color,
                shift_types::hours,
            ))
            .load(&mut *guard)?;

        if type_rows.is_empty() {
            return Ok(None);
        }

        let rename_rows: Vec<(String, String)> = shift_renames::table
            .select((shift_renames::old_code, shift_renames::new_code))
            .load(&mut *guard)?;

        let types: Vec<ShiftType> = type_rows
            .into_iter()
            .map(|(code, label, color, hours)| {
                ShiftType::new(&code, &label, &color, hours.as_deref())
            })
            .collect();
        Ok(Some(ShiftCatalog::from_parts(
            types,
            rename_rows.into_iter().collect(),
        )))
    }

    fn write_catalog(&self, catalog: &ShiftCatalog) -> Result<(), PersistenceError> {
        let mut guard = self.lock();

        guard.transaction(|conn| {
            diesel::delete(shift_types::table).execute(conn)?;
            diesel::delete(shift_renames::table).execute(conn)?;

            let type_rows: Vec<NewShiftType<'_>> = catalog
                .types()
                .iter()
                .enumerate()
                .map(|(index, shift_type)| NewShiftType {
                    code: shift_type.code.value(),
                    label: shift_type.label.as_str(),
                    color: shift_type.color.as_str(),
                    hours: shift_type.hours.as_deref(),
                    sort_order: i32::try_from(index).unwrap_or(i32::MAX),
                })
                .collect();
            diesel::insert_into(shift_types::table)
                .values(&type_rows)
                .execute(conn)?;

            let rename_rows: Vec<NewRename<'_>> = catalog
                .renames()
                .iter()
                .map(|(old_code, new_code)| NewRename {
                    old_code: old_code.as_str(),
                    new_code: new_code.as_str(),
                })
                .collect();
            diesel::insert_into(shift_renames::table)
                .values(&rename_rows)
                .execute(conn)?;
            Ok(())
        })
    }
}

impl PersistenceGateway for SqliteGateway {
    async fn fetch_month(&self, month: MonthKey) -> Result<Vec<ShiftAssignment>, GatewayError> {
        debug!("Fetching shift rows for {month}");
        Ok(self.fetch_rows(month)?)
    }

    async fn upsert_cell(
        &self,
        employee: EmployeeId,
        date: Date,
        value: ShiftValue,
    ) -> Result<(), GatewayError> {
        debug!("Upserting cell {employee}@{}", format_iso_date(date));
        Ok(self.upsert_row(employee, date, &value)?)
    }

    async fn delete_month(&self, month: MonthKey) -> Result<(), GatewayError> {
        let removed = self.delete_rows(month)?;
        info!("Deleted {removed} shift rows for {month}");
        Ok(())
    }
}

impl CatalogStore for SqliteGateway {
    async fn load_roster(&self) -> Result<Option<Roster>, GatewayError> {
        Ok(self.read_roster()?)
    }

    async fn save_roster(&self, roster: &Roster) -> Result<(), GatewayError> {
        debug!("Saving roster with {} employees", roster.len());
        Ok(self.write_roster(roster)?)
    }

    async fn load_catalog(&self) -> Result<Option<ShiftCatalog>, GatewayError> {
        Ok(self.read_catalog()?)
    }

    async fn save_catalog(&self, catalog: &ShiftCatalog) -> Result<(), GatewayError> {
        debug!("Saving catalog with {} shift types", catalog.types().len());
        Ok(self.write_catalog(catalog)?)
    }
}

/// Initializes a `SQLite` database at the given URL and runs migrations.
fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Enables WAL mode for file-based `SQLite` databases.
///
/// WAL (Write-Ahead Logging) mode provides better read concurrency
/// for file-based databases.
fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA journal_mode = WAL").execute(conn)?;
    Ok(())
}

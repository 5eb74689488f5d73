// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of a month snapshot.
//!
//! One row per employee, one column per day. Day columns carry the grid's
//! header labels (`1(土)`, `2(日)`, ...) and cells carry the resolved shift
//! code, with the placeholder glyph standing in for unset cells.

use std::io::Write;

use shift_grid::GridSnapshot;
use tracing::debug;

use crate::day_label;
use crate::error::ExportError;

/// Writes `snapshot` as CSV to `writer`.
///
/// # Errors
///
/// Returns an error if a record cannot be written or the underlying
/// writer fails.
pub fn write_csv<W: Write>(snapshot: &GridSnapshot, writer: W) -> Result<(), ExportError> {
    debug!("Rendering CSV for {}", snapshot.month());
    let mut out = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = Vec::with_capacity(snapshot.days().len() + 1);
    header.push(String::from("employee"));
    for day in snapshot.days() {
        header.push(day_label(*day));
    }
    out.write_record(&header)?;

    for employee in snapshot.employees() {
        let mut row: Vec<String> = Vec::with_capacity(snapshot.days().len() + 1);
        row.push(employee.display_name());
        for day in snapshot.days() {
            row.push(snapshot.shift_at(employee.id, *day).to_string());
        }
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}

/// Renders `snapshot` as a CSV string.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn csv_string(snapshot: &GridSnapshot) -> Result<String, ExportError> {
    let mut buffer: Vec<u8> = Vec::new();
    write_csv(snapshot, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

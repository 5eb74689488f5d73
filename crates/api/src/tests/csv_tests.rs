// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use super::snapshot_with;
use crate::csv_string;

#[test]
fn test_header_carries_one_labelled_column_per_day() {
    let snapshot = snapshot_with(&[]);

    let rendered = csv_string(&snapshot).expect("render");

    let header = rendered.lines().next().expect("header line");
    assert!(header.starts_with("employee,1(土),2(日),3(月),4(火)"));
    assert_eq!(header.split(',').count(), 32);
}

#[test]
fn test_one_row_per_employee() {
    let snapshot = snapshot_with(&[]);

    let rendered = csv_string(&snapshot).expect("render");

    assert_eq!(rendered.lines().count(), 3);
}

#[test]
fn test_cells_carry_codes_and_the_placeholder_glyph() {
    let snapshot = snapshot_with(&[
        (1, date!(2025 - 03 - 01), "早"),
        (1, date!(2025 - 03 - 03), "遅"),
    ]);

    let rendered = csv_string(&snapshot).expect("render");

    let row = rendered.lines().nth(1).expect("first employee row");
    assert!(row.starts_with("佐藤,早,−,遅,−"));
}

#[test]
fn test_rows_use_the_display_name() {
    let snapshot = snapshot_with(&[]);

    let rendered = csv_string(&snapshot).expect("render");

    let row = rendered.lines().nth(2).expect("second employee row");
    assert!(row.starts_with("鈴木 花子,"));
}

#[test]
fn test_write_csv_renders_into_any_writer() {
    let snapshot = snapshot_with(&[(2, date!(2025 - 03 - 02), "早")]);
    let mut buffer: Vec<u8> = Vec::new();

    crate::write_csv(&snapshot, &mut buffer).expect("render");

    let rendered = String::from_utf8(buffer).expect("utf-8 output");
    assert!(rendered.contains("鈴木 花子,−,早,−"));
}

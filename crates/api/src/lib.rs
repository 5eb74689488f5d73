// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod csv_export;
mod email;
mod error;

#[cfg(test)]
mod tests;

pub use csv_export::{csv_string, write_csv};
pub use email::{EmailDraft, compose_email};
pub use error::ExportError;

use time::{Date, Weekday};

/// Short day label used in grid-shaped output: day of month plus the
/// Japanese weekday letter, e.g. `1(土)`.
pub(crate) fn day_label(date: Date) -> String {
    format!("{}({})", date.day(), weekday_kanji(date.weekday()))
}

pub(crate) const fn weekday_kanji(weekday: Weekday) -> char {
    match weekday {
        Weekday::Sunday => '日',
        Weekday::Monday => '月',
        Weekday::Tuesday => '火',
        Weekday::Wednesday => '水',
        Weekday::Thursday => '木',
        Weekday::Friday => '金',
        Weekday::Saturday => '土',
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence backends for the ShiftGrid scheduling system.
//!
//! This crate implements the [`shift_grid::PersistenceGateway`] and
//! [`shift_grid::CatalogStore`] traits on top of three interchangeable
//! backends:
//!
//! - **`SQLite`** ([`SqliteGateway`]) — the production backend, built on
//!   Diesel with embedded migrations. Supports file-based databases and
//!   unique shared in-memory databases for tests.
//! - **Document store** ([`LocalStoreGateway`]) — JSON documents on disk,
//!   one per month of shift data plus one each for the roster and the
//!   catalog. Mirrors the key-per-month layout browsers use for local
//!   storage, which makes exported data easy to inspect by hand.
//! - **In-memory** ([`MemoryGateway`]) — a `BTreeMap` behind a mutex, used
//!   by tests and as a scratch backend when no durability is wanted.
//!
//! [`Backend`] wraps the three in a single enum so callers can pick one at
//! runtime without generics leaking into their types.
//!
//! ## Storage model
//!
//! All backends store one record per `(employee, date)` cell. A cell set to
//! the unset glyph is stored explicitly rather than deleted, so a cleared
//! cell and a never-written cell stay distinguishable.
//!
//! ## Testing
//!
//! Standard tests run against all three backends with no external
//! infrastructure: `SQLite` tests use unique in-memory databases, document
//! store tests use temporary directories.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod diesel_schema;
mod error;
mod local_store;
mod memory;
mod sqlite;

#[cfg(test)]
mod tests;

pub use backend::Backend;
pub use error::PersistenceError;
pub use local_store::LocalStoreGateway;
pub use memory::MemoryGateway;
pub use sqlite::SqliteGateway;

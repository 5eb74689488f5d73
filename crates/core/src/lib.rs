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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cache;
mod config;
mod controller;
mod error;
mod gateway;
mod notice;
mod queue;
mod snapshot;
mod store;

#[cfg(test)]
mod tests;

pub use cache::MonthCache;
pub use config::{DEFAULT_CACHE_TTL, DEFAULT_IO_TIMEOUT, FlushPolicy, SyncConfig};
pub use controller::{
    EditOutcome, FlushReport, LoadOutcome, MonthDirection, MonthState, SyncController,
};
pub use error::{GatewayError, SyncError};
pub use gateway::{CatalogStore, PersistenceGateway};
pub use notice::{Notice, NoticeLevel};
pub use queue::{PendingChange, PendingChangeQueue};
pub use snapshot::GridSnapshot;
pub use store::ShiftStore;

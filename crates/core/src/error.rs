// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use shift_grid_domain::{DomainError, MonthKey};

/// Errors surfaced by a persistence gateway.
///
/// A gateway failure never corrupts local state: a failed fetch leaves the
/// store unchanged, a failed upsert leaves the cell queued for retry, and a
/// failed delete leaves the month untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backing store reported an I/O failure.
    Io(String),
    /// The operation did not complete within the configured time limit.
    Timeout(Duration),
    /// The backing store could not be reached at all.
    Unavailable(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(detail) => write!(f, "I/O failure: {detail}"),
            Self::Timeout(limit) => write!(f, "Operation timed out after {limit:?}"),
            Self::Unavailable(detail) => write!(f, "Backing store unavailable: {detail}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Errors returned by [`SyncController`](crate::SyncController) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A domain rule was violated.
    Domain(DomainError),
    /// The backing store failed.
    Gateway(GatewayError),
    /// An operation needed a month that is not currently loaded.
    MonthNotLoaded(MonthKey),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(error) => write!(f, "{error}"),
            Self::Gateway(error) => write!(f, "Persistence failed: {error}"),
            Self::MonthNotLoaded(month) => write!(f, "Month {month} is not loaded"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<DomainError> for SyncError {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}

impl From<GatewayError> for SyncError {
    fn from(error: GatewayError) -> Self {
        Self::Gateway(error)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

/// How long a cached month stays valid.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// How long a single gateway call may run before it is treated as failed.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);

/// When queued edits are pushed to the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Every edit flushes as soon as it is queued.
    Immediate,
    /// Edits flush once the window has elapsed since the last edit; every
    /// edit restarts the window, so a burst collapses into one flush.
    Debounced(Duration),
    /// Edits stay queued until an explicit save.
    Manual,
}

/// Tunable behavior of the [`SyncController`](crate::SyncController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// When queued edits are flushed.
    pub flush_policy: FlushPolicy,
    /// Lifetime of a cached month.
    pub cache_ttl: Duration,
    /// Upper bound on any single gateway call.
    pub io_timeout: Duration,
    /// Whether a month switch also warms the cache for the next month in
    /// the same direction.
    pub prefetch_adjacent: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            flush_policy: FlushPolicy::Manual,
            cache_ttl: DEFAULT_CACHE_TTL,
            io_timeout: DEFAULT_IO_TIMEOUT,
            prefetch_adjacent: false,
        }
    }
}

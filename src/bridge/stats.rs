//! Bridge Statistics Module
//!
//! Lock-free counters of what happened to delivered messages.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Bridge Stats ==
/// Message counters, safe to update from any delivery thread.
#[derive(Debug, Default)]
pub struct BridgeStats {
    received: AtomicU64,
    invalidated: AtomicU64,
    flushed: AtomicU64,
    ignored: AtomicU64,
    rejected: AtomicU64,
}

/// Point-in-time copy of [`BridgeStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BridgeStatsSnapshot {
    /// Messages delivered to the bridge
    pub received: u64,
    /// Invalidate events actioned
    pub invalidated: u64,
    /// Flush events actioned
    pub flushed: u64,
    /// Events of unknown kind
    pub ignored: u64,
    /// Messages rejected before any side effect
    pub rejected: u64,
}

impl BridgeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidated(&self) {
        self.invalidated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_flushed(&self) {
        self.flushed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignored(&self) {
        self.ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the current counter values.
    pub fn snapshot(&self) -> BridgeStatsSnapshot {
        BridgeStatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            invalidated: self.invalidated.load(Ordering::Relaxed),
            flushed: self.flushed.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

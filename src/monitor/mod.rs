//! Source Monitor Module
//!
//! Tracks whether the upstream event source is alive, based on the liveness
//! signals the bridge sends for every actioned event.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::bridge::HealthMonitor;

// == Source Status ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    /// No signal received yet
    Unknown,
    Up,
    Down,
}

impl SourceStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Up,
            2 => Self::Down,
            _ => Self::Unknown,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Up => 1,
            Self::Down => 2,
        }
    }
}

/// Point-in-time view of a [`SourceMonitor`].
#[derive(Debug, Clone, Serialize)]
pub struct SourceSnapshot {
    pub status: SourceStatus,
    /// Time of the last liveness signal
    pub last_up: Option<DateTime<Utc>>,
    /// Number of liveness signals received
    pub signals: u64,
}

// == Source Monitor ==
/// Status occupies the top two bits of the packed state, millis the rest.
const STATUS_SHIFT: u32 = 62;
const MILLIS_MASK: u64 = (1 << STATUS_SHIFT) - 1;

fn pack(status: SourceStatus, millis: u64) -> u64 {
    (u64::from(status.as_u8()) << STATUS_SHIFT) | (millis & MILLIS_MASK)
}

fn unpack(state: u64) -> (SourceStatus, u64) {
    // Truncation is fine: only two bits remain after the shift
    let status = SourceStatus::from_u8((state >> STATUS_SHIFT) as u8);
    (status, state & MILLIS_MASK)
}

/// Lock-free health monitor for the upstream event source.
///
/// Status and last-up time share one atomic word, so a liveness signal can
/// never be overwritten by a staleness check that read an older timestamp.
#[derive(Debug)]
pub struct SourceMonitor {
    /// Packed status and Unix millis of the last signal, 0 millis = never
    state: AtomicU64,
    signals: AtomicU64,
}

impl Default for SourceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceMonitor {
    pub fn new() -> Self {
        Self {
            state: AtomicU64::new(pack(SourceStatus::Unknown, 0)),
            signals: AtomicU64::new(0),
        }
    }

    pub fn status(&self) -> SourceStatus {
        unpack(self.state.load(Ordering::Acquire)).0
    }

    pub fn last_up(&self) -> Option<DateTime<Utc>> {
        millis_to_time(unpack(self.state.load(Ordering::Acquire)).1)
    }

    /// Records a liveness signal at `now`.
    pub fn mark_up_at(&self, now: DateTime<Utc>) {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let previous = self
            .state
            .swap(pack(SourceStatus::Up, millis), Ordering::AcqRel);
        self.signals.fetch_add(1, Ordering::Relaxed);
        if unpack(previous).0 != SourceStatus::Up {
            info!("Cache event source is up");
        }
    }

    /// Marks the source as down. Returns true if it was not down already.
    pub fn mark_source_down(&self) -> bool {
        let previous = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                match unpack(state) {
                    (SourceStatus::Down, _) => None,
                    (_, millis) => Some(pack(SourceStatus::Down, millis)),
                }
            });
        let changed = previous.is_ok();
        if changed {
            warn!("Cache event source is down");
        }
        changed
    }

    // == Staleness Check ==
    /// Marks the source down if the last signal is older than `timeout`.
    ///
    /// A source that never signalled stays `Unknown`. The transition only
    /// happens if no signal arrived since the state was read. Returns true if
    /// the status changed to down.
    pub fn check_staleness(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        let state = self.state.load(Ordering::Acquire);
        let (status, millis) = unpack(state);
        let stale = match millis_to_time(millis) {
            Some(last_up) => status == SourceStatus::Up && now - last_up > timeout,
            None => false,
        };
        if !stale {
            return false;
        }

        let marked = self
            .state
            .compare_exchange(
                state,
                pack(SourceStatus::Down, millis),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if marked {
            warn!("Cache event source is down");
        }
        marked
    }

    pub fn snapshot(&self) -> SourceSnapshot {
        let (status, millis) = unpack(self.state.load(Ordering::Acquire));
        SourceSnapshot {
            status,
            last_up: millis_to_time(millis),
            signals: self.signals.load(Ordering::Relaxed),
        }
    }
}

fn millis_to_time(millis: u64) -> Option<DateTime<Utc>> {
    match i64::try_from(millis) {
        Ok(0) | Err(_) => None,
        Ok(ms) => Utc.timestamp_millis_opt(ms).single(),
    }
}

impl HealthMonitor for SourceMonitor {
    fn mark_source_up(&self) {
        self.mark_up_at(Utc::now());
    }
}

//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Removes expired local cache entries at configured intervals
//! - Source Watchdog: Marks the event source down when it stops signalling

mod cleanup;
mod watchdog;

pub use cleanup::spawn_cleanup_task;
pub use watchdog::spawn_watchdog_task;

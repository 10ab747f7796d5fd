//! Cache Bridge - broker-driven invalidation of a local cache
//!
//! Consumes upstream cache events delivered by a message broker and keeps a
//! local in-process cache consistent with the upstream store.

pub mod api;
pub mod bridge;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod monitor;
pub mod tasks;

pub use api::AppState;
pub use bridge::{CacheEventBridge, CacheInvalidator, HealthMonitor, InboundMessage};
pub use config::Config;
pub use tasks::{spawn_cleanup_task, spawn_watchdog_task};
